//! Process-level tests of the runner: exit codes, stderr, the `arg` table.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

fn script(source: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".lua")
        .tempfile()
        .expect("temp script");
    file.write_all(source.as_bytes()).expect("write script");
    file
}

fn run(path: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vellum-lua"))
        .arg(path)
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .expect("spawn runner")
}

#[test]
fn clean_script_exits_zero() {
    let file = script("x = 1 + 1");
    let output = run(file.path(), &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn script_error_exits_one_with_stderr() {
    let file = script("this_function_does_not_exist()");
    let output = run(file.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("vellum-lua:"), "stderr: {stderr}");
    assert!(
        stderr.contains("this_function_does_not_exist") || stderr.contains("nil"),
        "stderr: {stderr}"
    );
}

#[test]
fn missing_script_path_exits_one() {
    let output = Command::new(env!("CARGO_BIN_EXE_vellum-lua"))
        .output()
        .expect("spawn runner");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn unreadable_script_exits_one() {
    let output = run(Path::new("/no/such/script.lua"), &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read script"), "stderr: {stderr}");
}

#[test]
fn arg_table_follows_lua_convention() {
    let file = script(
        r#"
        assert(arg[0]:match("%.lua$"), "arg[0] should be the script path")
        assert(arg[1] == "alpha", "arg[1] mismatch")
        assert(arg[2] == "beta", "arg[2] mismatch")
        assert(arg[3] == nil, "arg table too long")
        "#,
    );
    let output = run(file.path(), &["alpha", "beta"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn raising_timer_callback_logs_once_and_does_not_crash() {
    let file = script(
        r#"
        local backend = Backend.create()
        backend:addTimer(10, function() error("timer detonated") end)
        backend:enterLoop()
        done = true
        "#,
    );
    let output = run(file.path(), &[]);
    // the failure is contained: the script finishes and the process exits 0
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stderr = String::from_utf8_lossy(&output.stderr);
    let mentions = stderr.matches("Timer callback").count();
    assert_eq!(mentions, 1, "stderr: {stderr}");
    assert!(stderr.contains("timer detonated"), "stderr: {stderr}");
}

#[test]
fn gui_script_end_to_end() {
    let file = script(
        r#"
        local backend = Backend.create()
        local win = Window.begin(backend)
            :type(WindowType.TOPLEVEL)
            :appTitle("smoke")
            :preferredSize(Vec2.new(200, 100))
            :commence()
        local column = ColumnLayout.begin():gap(2):commence()
        column:addChild(Text.begin():text("hello"):commence())
        column:addChild(Button.begin():label("ok"):commence())
        win:rootElement():addChild(column)
        win:open()
        assert(win:pixelSize().x == 200)
        assert(win:rootElement():childCount() == 1)
        win:close()
        backend:destroy()
        "#,
    );
    let output = run(file.path(), &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}
