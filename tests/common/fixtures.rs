//! Reusable test content.

/// Valid source
pub const MAIN_SCSS: &str = "body { color: red; }\n";

/// Second valid source
pub const ADMIN_SCSS: &str = ".admin { display: none; }\n";

/// Source the stand-in compiler rejects
pub const BROKEN_SCSS: &str = "@error \"unterminated block\";\n";

/// Stand-in compiler: `compile.sh STYLE INPUT OUTPUT`.
///
/// Logs every invocation to `compile.log` next to itself, fails with a
/// diagnostic on inputs containing `@error`, and otherwise writes the style
/// banner followed by the input to the output.
pub const COMPILER_SCRIPT: &str = r#"#!/bin/sh
echo "$2" >> "$(dirname "$0")/compile.log"
if grep -q "@error" "$2"; then
  echo "Error: unterminated block" >&2
  echo "  --> $2:1" >&2
  exit 65
fi
{ printf '/* %s */\n' "$1"; cat "$2"; } > "$3"
"#;

/// Banner the stand-in compiler writes for a style
pub fn banner(style: &str) -> String {
    format!("/* {} */\n", style)
}
