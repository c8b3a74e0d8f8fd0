use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use tower::ServiceExt;

use spec_catalogue::api::routes::create_router;
use spec_catalogue::host::InMemoryHost;
use spec_catalogue::logic::{SpecEvolutionPipeline, SpecEvolutionSummaryMapper};
use spec_catalogue::model::{
    BranchRef, CatalogueId, CatalogueManifestId, Comparison, EvolutionItem, PullRequest, RepoId,
    Tag, UserContext,
};

const MANIFEST: &str = r#"
catalogues:
  payments:
    title: Payment interfaces
    description: Interfaces owned by the payments team
    interfaces:
      orders:
        spec-file:
          file-path: orders.yaml
        spec-evolution:
          release-branches:
            branch-prefix: release/
          release-tags:
            tag-prefix: v
      refunds:
        spec-file:
          file-path: refunds.yaml
"#;

const ORDERS_SPEC: &str = "openapi: 3.0.0\ninfo:\n  title: Orders API\n  version: 1.2.0\npaths: {}\n";

fn repo() -> RepoId {
    RepoId::new("acme", "specs")
}

fn catalogue_id() -> CatalogueId {
    CatalogueId::new(
        CatalogueManifestId::new(repo(), "catalog.yaml"),
        "payments",
    )
}

fn branch(name: &str, sha: &str, spec_content: Option<&str>) -> BranchRef {
    BranchRef {
        name: name.to_string(),
        commit_sha: sha.to_string(),
        spec_content: spec_content.map(|s| s.to_string()),
    }
}

fn tag(name: &str, sha: &str) -> Tag {
    Tag {
        name: name.to_string(),
        commit_sha: sha.to_string(),
    }
}

fn comparison(ahead_by: u64, behind_by: u64) -> Comparison {
    Comparison {
        ahead_by,
        behind_by,
        total_commits: ahead_by + behind_by,
    }
}

fn pull_request(number: u64, base: &str, files: &[&str]) -> PullRequest {
    PullRequest {
        repository: repo(),
        branch_name: format!("proposal-{}", number),
        base_branch: base.to_string(),
        number,
        url: format!("https://host.test/acme/specs/pull/{}", number),
        labels: vec!["spec-change".to_string()],
        changed_files: files.iter().map(|f| f.to_string()).collect(),
        title: format!("Proposal {}", number),
        updated_at: Utc::now(),
    }
}

/// Host fixture: a manifest repo with a main branch, one release branch,
/// three version tags (one diverged from main), one unrelated tag, and two
/// open pull requests of which one touches the orders spec file.
fn seeded_host() -> InMemoryHost {
    let mut host = InMemoryHost::new();
    let repo = repo();

    host.seed_text_file(&repo, "catalog.yaml", MANIFEST);
    host.seed_default_branch(&repo, "main");

    host.seed_branch(&repo, branch("main", "head-main", Some(ORDERS_SPEC)));
    host.seed_branch(&repo, branch("release/1.1", "head-rel-11", None));

    host.seed_tag(&repo, tag("v1.0.0", "sha-100"));
    host.seed_tag(&repo, tag("v1.1.0", "sha-110"));
    host.seed_tag(&repo, tag("v1.1.1", "sha-111"));
    host.seed_tag(&repo, tag("beta-1", "sha-beta"));

    // v1.1.1 lives only on the release branch and has diverged from main.
    host.seed_comparison(&repo, "main", "v1.0.0", comparison(0, 5));
    host.seed_comparison(&repo, "main", "v1.1.0", comparison(0, 1));
    host.seed_comparison(&repo, "main", "v1.1.1", comparison(2, 0));
    host.seed_comparison(&repo, "release/1.1", "v1.1.1", comparison(0, 0));
    // Only consulted when no tag prefix narrows the candidate set.
    host.seed_comparison(&repo, "main", "beta-1", comparison(4, 0));

    host.seed_pull_request(&repo, pull_request(7, "main", &["orders.yaml"]));
    host.seed_pull_request(&repo, pull_request(8, "main", &["docs/README.md"]));

    host
}

#[tokio::test]
async fn full_pipeline_reconstructs_the_evolution() {
    let host = seeded_host();
    let evolution = SpecEvolutionPipeline::resolve_evolution(
        &host,
        &catalogue_id(),
        "orders",
        &UserContext::anonymous(),
    )
    .await
    .unwrap();

    assert_eq!(evolution.interface_name, "orders");
    // Main branch name came from the host's default branch.
    assert_eq!(evolution.config_used.main_branch_name, "main");
    assert_eq!(
        evolution.config_used.release_tag_prefix.as_deref(),
        Some("v")
    );

    let main = evolution.main.as_ref().unwrap();
    let kinds: Vec<&str> = main
        .evolution_items
        .iter()
        .map(|item| match item {
            EvolutionItem::PullRequest { .. } => "pull_request",
            EvolutionItem::BranchHead { .. } => "branch_head",
            EvolutionItem::Tag { .. } => "tag",
        })
        .collect();
    assert_eq!(kinds, vec!["pull_request", "branch_head", "tag", "tag"]);

    // Tags ordered closest-to-head first; the diverged v1.1.1 is absent.
    let main_tags: Vec<&str> = main
        .evolution_items
        .iter()
        .filter_map(|item| match item {
            EvolutionItem::Tag { tag, .. } => Some(tag.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(main_tags, vec!["v1.1.0", "v1.0.0"]);

    // The agreed version comes from the spec file at the main head.
    let head = main
        .evolution_items
        .iter()
        .find(|item| matches!(item, EvolutionItem::BranchHead { .. }))
        .unwrap();
    assert_eq!(
        head.spec_item().unwrap().version.as_deref(),
        Some("1.2.0")
    );

    // The release branch picked up the tag main could not claim.
    assert_eq!(evolution.releases.len(), 1);
    let release_tags: Vec<&str> = evolution.releases[0]
        .evolution_items
        .iter()
        .filter_map(|item| match item {
            EvolutionItem::Tag { tag, .. } => Some(tag.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(release_tags, vec!["v1.1.1"]);
}

#[tokio::test]
async fn summary_counts_match_the_evolution() {
    let host = seeded_host();
    let evolution = SpecEvolutionPipeline::resolve_evolution(
        &host,
        &catalogue_id(),
        "orders",
        &UserContext::anonymous(),
    )
    .await
    .unwrap();

    let summary = SpecEvolutionSummaryMapper::summarize(&evolution);
    assert_eq!(summary.interface_name, "orders");
    assert_eq!(summary.agreed_version_tag_count, 2);
    assert_eq!(summary.upcoming_release_count, 1);
    assert_eq!(summary.proposed_changes_count, 1);
    assert_eq!(
        summary.latest_agreed.unwrap().version.as_deref(),
        Some("1.2.0")
    );
}

#[tokio::test]
async fn interface_without_evolution_config_still_resolves() {
    let host = seeded_host();
    let evolution = SpecEvolutionPipeline::resolve_evolution(
        &host,
        &catalogue_id(),
        "refunds",
        &UserContext::anonymous(),
    )
    .await
    .unwrap();

    // No release branch prefix: releases are not tracked.
    assert!(evolution.releases.is_empty());
    assert_eq!(evolution.config_used.release_branch_prefix, None);
    // No tag prefix: all tags are candidates, but none were compared as
    // ancestors of refunds' main timeline fixtures, so main has a head item.
    assert!(evolution.main.is_some());
}

#[tokio::test]
async fn http_surface_maps_resolution_outcomes_to_status_codes() {
    let app = create_router().with_state(Arc::new(seeded_host()));
    let encoded = catalogue_id().encode();

    // 200: catalogue view.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/catalogues/{}", encoded))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["title"], "Payment interfaces");
    assert_eq!(body["interfaces"], serde_json::json!(["orders", "refunds"]));

    // 200: summary endpoint.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/catalogues/{}/interfaces/orders/summary", encoded))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["agreed_version_tag_count"], 2);
    assert_eq!(body["upcoming_release_count"], 1);
    assert_eq!(body["proposed_changes_count"], 1);

    // 404: unknown interface.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/catalogues/{}/interfaces/nope", encoded))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // 404: opaque id that does not decode.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/catalogues/bm90LXZhbGlk")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_surface_reports_config_errors_as_bad_request() {
    let mut host = InMemoryHost::new();
    host.seed_text_file(
        &repo(),
        "catalog.yaml",
        "catalogues:\n  payments:\n    title: Payments\n    interfaces:\n      orders: {}\n",
    );
    let app = create_router().with_state(Arc::new(host));

    // The interface exists but has no spec file location.
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/catalogues/{}/interfaces/orders",
                    catalogue_id().encode()
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn restricted_repository_is_indistinguishable_from_missing() {
    let mut host = seeded_host();
    host.restrict_repo(&repo(), &["insider"]);
    let app = create_router().with_state(Arc::new(host));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/catalogues/{}", catalogue_id().encode()))
                .header("x-user-login", "outsider")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/catalogues/{}", catalogue_id().encode()))
                .header("x-user-login", "insider")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
