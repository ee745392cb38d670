//! CLI integration tests for vodsearch commands.
//!
//! These focus on exit codes and the facts a user reads off the output, not on exact layout.

// Integration tests live outside cfg(test)
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a vodsearch command.
fn vodsearch() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("vodsearch").unwrap()
}

/// Runs `vodsearch` in `dir` with HOME isolated to it.
fn vodsearch_in(dir: &Path) -> Command {
    let mut cmd = vodsearch();
    cmd.env("HOME", dir)
        .env_remove("VODSEARCH_LOG")
        .current_dir(dir);
    cmd
}

/// Strips ANSI escape sequences from a string.
fn strip_ansi(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            output.push(ch);
        }
    }

    output
}

/// Stdout of a successful run, without colors.
fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    strip_ansi(&String::from_utf8(output).unwrap())
}

/// Stdout of a successful `vodsearch search` in `dir`.
fn search_stdout(dir: &Path, args: &[&str]) -> String {
    stdout_of(vodsearch_in(dir).arg("search").args(args))
}

/// Writes a small JSON corpus pair and a root config pointing at it.
fn write_corpus(dir: &Path) {
    let corpus = json!({
        "segments": {
            "v1": [[10, "i love"], [20, "speedrunning games"]],
            "v2": [[0, "What?! No way"], [4, "speedrunning is back"], [9, "what a run"]],
        },
        "word_map": {
            "speedrunning": {"v1": [1], "v2": [1]},
            "what": {"v2": [0, 2]},
            "run": {"v2": [2]},
        },
        "meta": {
            "v1": {"title": "Any% practice", "upload_date": 20_230_615},
            "v2": {"title": "Back at it", "upload_date": "20240102"},
        },
        "updatedAt": "2024-03-01 12:00:00.000001",
    });
    let full = json!({
        "v1": {"text": "i love speedrunning games",
               "idx_to_time": {"0": 10, "2": 12, "7": 20, "21": 40}},
        "v2": {"text": "What?! No way speedrunning is back what a run",
               "idx_to_time": {"0": 0, "7": 2, "14": 4, "27": 6, "35": 9}},
    });
    fs::write(dir.join("squeex.json"), corpus.to_string()).unwrap();
    fs::write(dir.join("squeex_full.json"), full.to_string()).unwrap();
    fs::write(
        dir.join(".vodsearch.toml"),
        "root = true\n\n[corpus]\npath = \"squeex.json\"\n",
    )
    .unwrap();
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let dir = temp_dir();

        vodsearch_in(dir.path()).arg("init").assert().success();

        let contents = fs::read_to_string(dir.path().join(".vodsearch.toml")).unwrap();
        assert!(contents.contains("# [corpus]"));
    }

    #[test]
    fn fails_if_config_exists() {
        let dir = temp_dir();
        fs::write(dir.path().join(".vodsearch.toml"), "existing").unwrap();

        vodsearch_in(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn force_overwrites_existing() {
        let dir = temp_dir();
        fs::write(dir.path().join(".vodsearch.toml"), "not = [valid").unwrap();

        vodsearch_in(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let contents = fs::read_to_string(dir.path().join(".vodsearch.toml")).unwrap();
        assert!(contents.contains("# [output]"));
    }

    #[test]
    fn global_writes_to_home() {
        let home = temp_dir();
        let work = temp_dir();

        vodsearch()
            .env("HOME", home.path())
            .current_dir(work.path())
            .args(["init", "--global"])
            .assert()
            .success();

        assert!(home.path().join(".vodsearch.toml").exists());
        assert!(!work.path().join(".vodsearch.toml").exists());
    }
}

mod search {
    use super::*;

    #[test]
    fn word_query_lists_clips_with_links() {
        let dir = temp_dir();
        write_corpus(dir.path());

        let out = search_stdout(dir.path(), &["Speedrunning"]);
        assert!(out.contains("Any% practice"));
        assert!(out.contains("Back at it"));
        assert!(out.contains("speedrunning games"));
        assert!(out.contains("https://youtube.com/watch?v=v1&t=17"));
        assert!(out.contains("https://youtube.com/watch?v=v2&t=1"));
        assert!(out.contains("said 2 times in 2 videos"));
        assert!(out.contains("Last updated 2024-03-01 12:00."));
        let newer = out.find("Back at it").unwrap();
        let older = out.find("Any% practice").unwrap();
        assert!(newer < older);
    }

    #[test]
    fn words_are_joined_into_a_phrase() {
        let dir = temp_dir();
        write_corpus(dir.path());

        let out = search_stdout(dir.path(), &["love", "speedrunning"]);
        assert!(out.contains("love speedrunning"));
        assert!(out.contains("https://youtube.com/watch?v=v1&t=9"));
        assert!(!out.contains("Back at it"));
    }

    #[test]
    fn phrase_metacharacters_match_literally() {
        let dir = temp_dir();
        write_corpus(dir.path());

        let out = search_stdout(dir.path(), &["--phrase", "what?!"]);
        assert!(out.contains("What?!"));
        assert!(out.contains("said 1 time in 1 video"));
    }

    #[test]
    fn no_results_is_success() {
        let dir = temp_dir();
        write_corpus(dir.path());

        vodsearch_in(dir.path())
            .args(["search", "nothing"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No results for \"nothing\"."));
    }

    #[test]
    fn forced_word_lookup_of_phrase_finds_nothing() {
        let dir = temp_dir();
        write_corpus(dir.path());

        vodsearch_in(dir.path())
            .args(["search", "--word", "love speedrunning"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No results"));
    }

    #[test]
    fn json_output_has_result_shape() {
        let dir = temp_dir();
        write_corpus(dir.path());

        let output = vodsearch_in(dir.path())
            .args(["search", "--json", "love speedrunning"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let value: Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(value["word"], "love speedrunning");
        let clips = json!([[12, "love speedrunning g"]]);
        assert_eq!(value["segments"]["v1"], clips);
        assert_eq!(value["meta"]["v2"]["title"], "Back at it");
        assert_eq!(value["updatedAt"], "2024-03-01 12:00:00.000001");
    }

    #[test]
    fn list_and_timeline_modes() {
        let dir = temp_dir();
        write_corpus(dir.path());

        let list = search_stdout(dir.path(), &["--list", "what"]);
        assert!(list.contains("Back at it"));
        assert!(list.contains("2024-01-02"));

        let timeline = search_stdout(dir.path(), &["--timeline", "speedrunning"]);
        let older = timeline.find("2023-06-15").unwrap();
        let newer = timeline.find("2024-01-02").unwrap();
        assert!(older < newer);
    }

    #[test]
    fn without_corpus_fails_with_hint() {
        let dir = temp_dir();
        fs::write(dir.path().join(".vodsearch.toml"), "root = true\n").unwrap();

        vodsearch_in(dir.path())
            .args(["search", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no corpus configured"))
            .stderr(predicate::str::contains("vodsearch init"));
    }

    #[test]
    fn missing_corpus_file_fails() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".vodsearch.toml"),
            "root = true\n[corpus]\npath = \"gone.json\"\n",
        )
        .unwrap();

        vodsearch_in(dir.path())
            .args(["search", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load corpus"));
    }

    #[test]
    fn invalid_config_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join(".vodsearch.toml"), "not = [valid").unwrap();

        vodsearch_in(dir.path())
            .args(["search", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

mod top {
    use super::*;

    #[test]
    fn ranks_words_by_mentions() {
        let dir = temp_dir();
        write_corpus(dir.path());

        let out = stdout_of(vodsearch_in(dir.path()).args(["top", "-n", "2"]));
        assert!(out.contains("speedrunning"));
        assert!(out.contains("what"));
        assert!(!out.contains("run "));
    }

    #[test]
    fn json_output() {
        let dir = temp_dir();
        write_corpus(dir.path());

        let output = vodsearch_in(dir.path())
            .args(["top", "--json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let value: Value = serde_json::from_slice(&output).unwrap();
        let words = value.as_array().unwrap();
        assert_eq!(words.len(), 3);
        assert_eq!(words[0], json!({"word": "speedrunning", "count": 2}));
        assert_eq!(words[1], json!({"word": "what", "count": 2}));
    }
}

mod status {
    use super::*;

    #[test]
    fn without_config_suggests_init() {
        let dir = temp_dir();

        vodsearch_in(dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("No configuration files found."));
    }

    #[test]
    fn shows_corpus_and_statistics() {
        let dir = temp_dir();
        write_corpus(dir.path());

        let out = stdout_of(vodsearch_in(dir.path()).arg("status"));
        assert!(out.contains(".vodsearch.toml"));
        assert!(out.contains("squeex.json (json)"));
        assert!(out.contains("squeex_full.json"));
        assert!(out.contains("Videos:           2"));
        assert!(out.contains("Indexed words:    3"));
        assert!(out.contains("No issues found."));
    }

    #[test]
    fn missing_corpus_is_reported() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".vodsearch.toml"),
            "root = true\n[corpus]\npath = \"gone.db\"\n",
        )
        .unwrap();

        let output = vodsearch_in(dir.path())
            .arg("status")
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        let out = strip_ansi(&String::from_utf8(output).unwrap());
        assert!(out.contains("[missing]"));
        assert!(out.contains("corpus does not exist"));
        assert!(out.contains("Hints:"));
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_effective_settings() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".vodsearch.toml"),
            "root = true\n[output]\nlead_in = 5\n",
        )
        .unwrap();

        let out = stdout_of(vodsearch_in(dir.path()).arg("config"));
        assert!(out.contains("lead_in = 5"));
        assert!(out.contains("top_limit = 20"));
    }

    #[test]
    fn lead_in_moves_links() {
        let dir = temp_dir();
        write_corpus(dir.path());
        fs::write(
            dir.path().join(".vodsearch.toml"),
            r#"root = true
[corpus]
path = "squeex.json"
[output]
lead_in = 30
highlight = false
"#,
        )
        .unwrap();

        let out = search_stdout(dir.path(), &["speedrunning"]);
        assert!(out.contains("https://youtube.com/watch?v=v1&t=0"));
    }
}
