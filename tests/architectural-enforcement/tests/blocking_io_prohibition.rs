//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: Production code MUST NOT use blocking I/O. Presets are
//! fetched with `reqwest` and `tokio::fs`.
//! **Exceptions**: Configuration is read once in `config.rs` before the
//! event loop starts; test code

use architectural_enforcement::production_sources;

const FORBIDDEN: &[&str] = &[
    "reqwest::blocking",
    "std::net::",
    "std::process::Command",
    "std::fs::",
];

/// Files allowed to touch `std::fs` before the runtime is busy
const STD_FS_ALLOWED: &[&str] = &["namegen/core/src/config.rs"];

/// Test that production code does not use blocking I/O
#[test]
fn test_no_blocking_io_in_production_code() {
    let mut violations = Vec::new();

    for file in production_sources() {
        let fs_allowed = STD_FS_ALLOWED.iter().any(|allowed| file.is(allowed));

        for (line_number, code) in file.code_lines() {
            for pattern in FORBIDDEN {
                if *pattern == "std::fs::" && fs_allowed {
                    continue;
                }
                if code.contains(pattern) {
                    violations.push(format!(
                        "{}:{}: {} ({})",
                        file.path.display(),
                        line_number,
                        code.trim(),
                        pattern
                    ));
                }
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Blocking I/O calls found in production code!\n");
        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }
        eprintln!("\n✅ REQUIRED async I/O:");
        eprintln!("  - tokio::fs::read_to_string().await");
        eprintln!("  - reqwest::Client::get().send().await");

        panic!(
            "\nFound {} blocking I/O violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

/// The loader must stay on async file reads
#[test]
fn test_loader_uses_tokio_fs() {
    let loader = production_sources()
        .into_iter()
        .find(|f| f.is("namegen/core/src/loader.rs"))
        .expect("loader.rs present");

    assert!(loader
        .code_lines()
        .any(|(_, code)| code.contains("tokio::fs::read_to_string")));
}
