use readme_gen::config::{ConfigError, RepoAccess, RepoRequest};
use readme_gen::generate::{GenerateError, MockReadmeGenerator};
use readme_gen::github::{ContentsEntry, FetchError, MockRepoContents};
use readme_gen::pipeline::{generate_readme, PipelineError};

fn request(owner: &str, repo: &str, token: Option<&str>, access: RepoAccess) -> RepoRequest {
    RepoRequest {
        owner: owner.to_string(),
        repo: repo.to_string(),
        token: token.map(str::to_string),
        access,
    }
}

fn file(name: &str, url: &str) -> ContentsEntry {
    ContentsEntry {
        name: name.to_string(),
        path: name.to_string(),
        kind: "file".to_string(),
        content: None,
        download_url: Some(url.to_string()),
    }
}

#[tokio::test]
async fn empty_owner_is_rejected_before_any_call() {
    let provider = MockRepoContents::new();
    let generator = MockReadmeGenerator::new();

    let err = generate_readme(
        &provider,
        &generator,
        &request("  ", "hello", None, RepoAccess::Public),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Config(ConfigError::MissingOwner)
    ));
}

#[tokio::test]
async fn private_access_without_a_token_is_rejected() {
    let provider = MockRepoContents::new();
    let generator = MockReadmeGenerator::new();

    let err = generate_readme(
        &provider,
        &generator,
        &request("octocat", "hello", Some("   "), RepoAccess::Private),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Config(ConfigError::MissingToken)
    ));
}

#[tokio::test]
async fn no_eligible_files_never_invokes_the_generator() {
    let mut provider = MockRepoContents::new();
    provider
        .expect_list_dir()
        .withf(|path: &str| path.is_empty())
        .returning(|_| Ok(vec![file("diagram.svg", "https://raw.test/diagram.svg")]));
    let mut generator = MockReadmeGenerator::new();
    generator.expect_generate().times(0);

    let err = generate_readme(
        &provider,
        &generator,
        &request("octocat", "hello", None, RepoAccess::Public),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PipelineError::NoEligibleFiles));
}

#[tokio::test]
async fn root_fetch_errors_propagate_and_skip_generation() {
    let mut provider = MockRepoContents::new();
    provider
        .expect_list_dir()
        .withf(|path: &str| path.is_empty())
        .returning(|_| Err(FetchError::AccessDenied));
    let mut generator = MockReadmeGenerator::new();
    generator.expect_generate().times(0);

    let err = generate_readme(
        &provider,
        &generator,
        &request("octocat", "hello", None, RepoAccess::Public),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Fetch(FetchError::AccessDenied)
    ));
}

#[tokio::test]
async fn generation_errors_propagate() {
    let mut provider = MockRepoContents::new();
    provider
        .expect_list_dir()
        .withf(|path: &str| path.is_empty())
        .returning(|_| Ok(vec![file("main.rs", "https://raw.test/main.rs")]));
    provider
        .expect_fetch_raw()
        .returning(|_| Ok("fn main() {}".to_string()));
    let mut generator = MockReadmeGenerator::new();
    generator
        .expect_generate()
        .returning(|_| Err(GenerateError::MalformedResponse));

    let err = generate_readme(
        &provider,
        &generator,
        &request("octocat", "hello", None, RepoAccess::Public),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Generate(GenerateError::MalformedResponse)
    ));
}

#[tokio::test]
async fn happy_path_reports_readme_and_per_file_warnings() {
    let mut provider = MockRepoContents::new();
    provider
        .expect_list_dir()
        .withf(|path: &str| path.is_empty())
        .returning(|_| {
            Ok(vec![
                file("main.rs", "https://raw.test/main.rs"),
                file("huge.json", "https://raw.test/huge.json"),
            ])
        });
    provider
        .expect_fetch_raw()
        .withf(|url: &str| url == "https://raw.test/main.rs")
        .returning(|_| Ok("fn main() {}".to_string()));
    provider
        .expect_fetch_raw()
        .withf(|url: &str| url == "https://raw.test/huge.json")
        .returning(|_| Err(FetchError::Http(403)));

    let mut generator = MockReadmeGenerator::new();
    generator
        .expect_generate()
        .withf(|text: &str| text.contains("--- main.rs ---") && !text.contains("huge.json"))
        .times(1)
        .returning(|_| Ok("# Hello Project".to_string()));

    let report = generate_readme(
        &provider,
        &generator,
        &request("octocat", "hello", None, RepoAccess::Public),
    )
    .await
    .unwrap();

    assert_eq!(report.readme, "# Hello Project");
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].path, "huge.json");
}
