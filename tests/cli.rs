use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_the_generate_subcommand() {
    let mut cmd = Command::cargo_bin("readme-gen").expect("Binary exists");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn generate_requires_owner_and_repo() {
    let mut cmd = Command::cargo_bin("readme-gen").expect("Binary exists");
    cmd.arg("generate");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--owner").and(predicate::str::contains("--repo")));
}

#[test]
fn missing_generation_api_key_fails_with_a_clear_message() {
    let mut cmd = Command::cargo_bin("readme-gen").expect("Binary exists");
    cmd.args(["generate", "--owner", "octocat", "--repo", "hello"])
        .env_remove("GEMINI_API_KEY");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn blank_owner_is_rejected_before_any_network_call() {
    let mut cmd = Command::cargo_bin("readme-gen").expect("Binary exists");
    cmd.args(["generate", "--owner", " ", "--repo", "hello"])
        .env("GEMINI_API_KEY", "test-key");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("owner must not be empty"));
}

#[test]
fn private_flag_without_token_is_rejected() {
    let mut cmd = Command::cargo_bin("readme-gen").expect("Binary exists");
    cmd.args([
        "generate", "--owner", "octocat", "--repo", "hello", "--private",
    ])
    .env("GEMINI_API_KEY", "test-key")
    .env_remove("GITHUB_TOKEN");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("token is required"));
}
