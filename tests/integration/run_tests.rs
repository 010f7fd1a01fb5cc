use clap::Parser;
use namedupe::cli::Cli;
use namedupe::config::Config;
use namedupe::error::ExitCode;
use namedupe::run_with_io;
use namedupe::signal::ShutdownHandler;
use std::fs;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tempfile::tempdir;

fn setup(root: &Path) {
    for sub in ["a", "b", "c"] {
        fs::create_dir_all(root.join(sub)).unwrap();
    }
    fs::write(root.join("a/x.txt"), "first").unwrap();
    fs::write(root.join("b/x.txt"), "second").unwrap();
    fs::write(root.join("c/y.txt"), "other").unwrap();
}

fn run(args: &[&str], root: &Path, input: &str) -> (ExitCode, String) {
    let mut argv = vec!["namedupe", "--no-progress"];
    argv.extend_from_slice(args);
    let root_arg = root.to_string_lossy().into_owned();
    argv.push(&root_arg);

    let cli = Cli::try_parse_from(argv).unwrap();
    let config = Config::default().merge_cli(&cli);
    let mut output = Vec::new();
    let code = run_with_io(
        &cli,
        &config,
        &ShutdownHandler::new(),
        input.as_bytes(),
        &mut output,
    )
    .unwrap();
    (code, String::from_utf8(output).unwrap())
}

#[test]
fn test_run_silent_removes_later_copy() {
    let dir = tempdir().unwrap();
    setup(dir.path());

    let (code, output) = run(&["-s"], dir.path(), "");

    assert_eq!(code, ExitCode::Success);
    assert!(output.is_empty());
    assert!(dir.path().join("a/x.txt").exists());
    assert!(!dir.path().join("b/x.txt").exists());
    assert!(dir.path().join("c/y.txt").exists());
}

#[test]
fn test_run_prompts_and_keeps_on_no() {
    let dir = tempdir().unwrap();
    setup(dir.path());

    let (code, output) = run(&[], dir.path(), "n\n");

    assert_eq!(code, ExitCode::Success);
    assert!(output.starts_with("Do you want to delete file "));
    assert!(output.contains("x.txt\n y - yes\n n - no\n a - all\n l - list only\n[y/n/a/l]: "));
    assert!(dir.path().join("b/x.txt").exists());
}

#[test]
fn test_run_list_flag_prints_notices() {
    let dir = tempdir().unwrap();
    setup(dir.path());

    let (code, output) = run(&["--list"], dir.path(), "");

    assert_eq!(code, ExitCode::Success);
    assert!(output.starts_with("Duplicate: "));
    assert_eq!(output.lines().count(), 1);
    assert!(dir.path().join("b/x.txt").exists());
}

#[test]
fn test_run_delete_flag_is_accepted() {
    let dir = tempdir().unwrap();
    setup(dir.path());

    let (code, output) = run(&["-d", "-h"], dir.path(), "y\n");

    assert_eq!(code, ExitCode::Success);
    assert_eq!(output.matches("Do you want to delete file").count(), 1);
    assert!(!dir.path().join("b/x.txt").exists());
}

#[test]
fn test_run_without_duplicates_never_reads_input() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("only.txt"), "x").unwrap();

    let (code, output) = run(&[], dir.path(), "");

    assert_eq!(code, ExitCode::Success);
    assert!(output.is_empty());
}

#[test]
fn test_run_closed_input_is_error() {
    let dir = tempdir().unwrap();
    setup(dir.path());

    let cli = Cli::try_parse_from([
        "namedupe",
        "--no-progress",
        dir.path().to_str().unwrap(),
    ])
    .unwrap();
    let config = Config::default().merge_cli(&cli);
    let result = run_with_io(&cli, &config, &ShutdownHandler::new(), &b""[..], Vec::new());

    let err = result.unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    assert!(dir.path().join("b/x.txt").exists());
}

#[test]
fn test_run_missing_directory_is_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let cli = Cli::try_parse_from(["namedupe", "--no-progress", missing.to_str().unwrap()])
        .unwrap();
    let result = run_with_io(
        &cli,
        &Config::default(),
        &ShutdownHandler::new(),
        &b""[..],
        Vec::new(),
    );

    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("Path not found"));
}

#[test]
fn test_run_interrupted_before_compare() {
    let dir = tempdir().unwrap();
    setup(dir.path());

    let cli = Cli::try_parse_from(["namedupe", "-s", "--no-progress", dir.path().to_str().unwrap()])
        .unwrap();
    let config = Config::default().merge_cli(&cli);
    let handler = ShutdownHandler::new();
    handler.request_shutdown();

    let err = run_with_io(&cli, &config, &handler, &b""[..], Vec::new()).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::Interrupted);
    assert!(dir.path().join("b/x.txt").exists());
}

/// Input that delivers its answers as if Ctrl+C arrived while reading them.
struct InterruptedInput {
    handler: ShutdownHandler,
    answers: &'static [u8],
}

impl Read for InterruptedInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.handler.request_shutdown();
        self.answers.read(buf)
    }
}

#[test]
fn test_run_interrupted_during_disposition() {
    let dir = tempdir().unwrap();
    setup(dir.path());
    fs::create_dir_all(dir.path().join("d")).unwrap();
    fs::write(dir.path().join("d/x.txt"), "third").unwrap();

    let cli = Cli::try_parse_from([
        "namedupe",
        "--sort",
        "--no-progress",
        dir.path().to_str().unwrap(),
    ])
    .unwrap();
    let config = Config::default().merge_cli(&cli);
    let handler = ShutdownHandler::new();
    let input = BufReader::new(InterruptedInput {
        handler: handler.clone(),
        answers: b"y\n",
    });
    let mut output = Vec::new();

    let code = run_with_io(&cli, &config, &handler, input, &mut output).unwrap();

    assert_eq!(code, ExitCode::Interrupted);
    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.matches("Do you want to delete file").count(), 1);
    assert!(dir.path().join("a/x.txt").exists());
    assert!(!dir.path().join("b/x.txt").exists());
    assert!(dir.path().join("d/x.txt").exists());
}
