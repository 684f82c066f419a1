//! Test environment builder for isolated Stylesmith testing.
//!
//! Provides `TestEnv` - a temp project directory with a `stylesmith.toml`,
//! a stand-in compiler script, and helpers to run the CLI inside it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

use super::fixtures::COMPILER_SCRIPT;

/// Environment variables that must not leak in from the developer's shell
const ISOLATED_VARS: &[&str] = &[
    "STYLESMITH_STYLE",
    "STYLESMITH_COMPILER",
    "STYLESMITH_JOBS",
    "STYLESMITH_LOG",
];

/// Result of running a Stylesmith CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse each stdout line as JSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("invalid JSON line {:?}: {}", line, e))
            })
            .collect()
    }
}

/// A job written into the generated config
#[derive(Debug, Clone)]
struct ConfiguredJob {
    name: String,
    input: String,
    output: String,
    style: Option<String>,
}

/// Isolated project directory
pub struct TestEnv {
    pub project_root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    pub fn root(&self) -> &Path {
        self.project_root.path()
    }

    /// Path relative to the project root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Run the CLI from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run the CLI from the project root with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.root()).args(args);
        for key in ISOLATED_VARS {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute stylesmith");
        Self::output_to_result(output)
    }

    fn output_to_result(output: Output) -> TestResult {
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    pub fn read_file(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    pub fn remove_file(&self, relative: &str) {
        std::fs::remove_file(self.path(relative)).expect("Failed to remove file");
    }

    /// Number of times the stand-in compiler ran
    pub fn compile_count(&self) -> usize {
        std::fs::read_to_string(self.path("compile.log"))
            .map(|log| log.lines().count())
            .unwrap_or(0)
    }

    /// Files in the record directory of the build state
    pub fn record_files(&self) -> Vec<String> {
        super::list_all_files(&self.path(".stylesmith/records"))
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    jobs: Vec<ConfiguredJob>,
    files: Vec<(String, String)>,
    build_section: Vec<String>,
    compiler_section: Option<String>,
    raw_jobs: Vec<String>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            files: Vec::new(),
            build_section: vec!["public_url = \"/static/\"".to_string()],
            compiler_section: None,
            raw_jobs: Vec::new(),
        }
    }

    /// Add a job `styles/<name>.scss -> generated/<name>.css` with the given source
    pub fn with_job(mut self, name: &str, source: &str) -> Self {
        let input = format!("styles/{}.scss", name);
        self.files.push((input.clone(), source.to_string()));
        self.jobs.push(ConfiguredJob {
            name: name.to_string(),
            input,
            output: format!("generated/{}.css", name),
            style: None,
        });
        self
    }

    /// Add a job with its own style
    pub fn with_styled_job(mut self, name: &str, source: &str, style: &str) -> Self {
        self = self.with_job(name, source);
        if let Some(job) = self.jobs.last_mut() {
            job.style = Some(style.to_string());
        }
        self
    }

    /// Append a raw `[[job]]` table body (for malformed entries)
    pub fn with_raw_job(mut self, body: &str) -> Self {
        self.raw_jobs.push(body.to_string());
        self
    }

    /// Add a line to the `[build]` table
    pub fn with_build_setting(mut self, line: &str) -> Self {
        self.build_section.push(line.to_string());
        self
    }

    /// Replace the `[compiler]` table body
    pub fn with_compiler_section(mut self, body: &str) -> Self {
        self.compiler_section = Some(body.to_string());
        self
    }

    pub fn build(self) -> TestEnv {
        let project_root = TempDir::new().expect("Failed to create temp dir");
        let env = TestEnv {
            project_root,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_stylesmith")),
        };

        env.write_file("compile.sh", COMPILER_SCRIPT);
        for (path, content) in &self.files {
            env.write_file(path, content);
        }

        let script = env.path("compile.sh");
        let compiler = self.compiler_section.unwrap_or_else(|| {
            format!(
                "bin = \"sh\"\nargs = ['{}', \"{{style}}\", \"{{input}}\", \"{{output}}\"]",
                script.display()
            )
        });

        let mut config = format!(
            "[compiler]\n{}\n\n[build]\n{}\n",
            compiler,
            self.build_section.join("\n")
        );
        for job in &self.jobs {
            config.push_str(&format!(
                "\n[[job]]\nname = \"{}\"\ninput = \"{}\"\noutput = \"{}\"\n",
                job.name, job.input, job.output
            ));
            if let Some(style) = &job.style {
                config.push_str(&format!("style = \"{}\"\n", style));
            }
        }
        for body in &self.raw_jobs {
            config.push_str(&format!("\n[[job]]\n{}\n", body));
        }
        env.write_file("stylesmith.toml", &config);

        env
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}
