//! Integration tests for the registry public API against a mock HTTP server.

use httpmock::prelude::*;
use serde_json::json;
use std::fs;
use std::sync::Arc;
use templar::config::{ConfigPaths, ExtensionConfig, RegistrySettings};
use templar::extension::StaticRepositoryProvider;
use templar::registry::{
    ExtensionOperation, HttpFetcher, RepositoryOperation, TemplateQuery, TemplateRegistry,
};
use templar::repository::RepositoryDescriptor;
use tempfile::TempDir;

fn index(labels: &[(&str, Option<&str>)]) -> serde_json::Value {
    let entries: Vec<_> = labels
        .iter()
        .map(|(label, style)| {
            let mut entry = json!({
                "displayName": label,
                "description": format!("{} template", label),
                "language": "java",
                "location": format!("https://github.com/example/{}", label),
                "projectType": "docker",
            });
            if let Some(style) = style {
                entry["projectStyle"] = json!(style);
            }
            entry
        })
        .collect();
    json!(entries)
}

fn settings_for(repositories: Vec<RepositoryDescriptor>) -> RegistrySettings {
    RegistrySettings {
        fetch_timeout_secs: Some(5),
        default_repositories: Some(repositories),
        extensions: Vec::new(),
    }
}

#[test]
fn aggregates_and_sorts_across_repositories() {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(GET).path("/first/index.json");
        then.status(200)
            .json_body(index(&[("Zebra", None), ("Node", Some("Appsody"))]));
    });
    let second = server.mock(|when, then| {
        when.method(GET).path("/second/index.json");
        then.status(200).json_body(index(&[("Apple", None)]));
    });

    let temp = TempDir::new().unwrap();
    let paths = ConfigPaths::new(temp.path());
    let registry = TemplateRegistry::open(
        &paths,
        &settings_for(vec![
            RepositoryDescriptor::new(server.url("/first/index.json"), "first"),
            RepositoryDescriptor::new(server.url("/second/index.json"), "second"),
        ]),
    )
    .unwrap();

    let templates = registry.get_templates(&TemplateQuery::all());
    let labels: Vec<_> = templates.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, ["Apple", "Node", "Zebra"]);

    // Served from cache the second time.
    let codewind = registry.get_templates(&TemplateQuery::all().with_style("Codewind"));
    assert_eq!(codewind.len(), 2);
    first.assert_calls(1);
    second.assert_calls(1);
}

#[test]
fn failing_repository_does_not_break_listing() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/good.json");
        then.status(200).json_body(index(&[("Good", None)]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/missing.json");
        then.status(404);
    });
    server.mock(|when, then| {
        when.method(GET).path("/html");
        then.status(200).body("<html>not json</html>");
    });

    let registry = TemplateRegistry::in_memory(Arc::new(HttpFetcher::new().unwrap()))
        .with_default_repositories(vec![
            RepositoryDescriptor::new(server.url("/missing.json"), "missing"),
            RepositoryDescriptor::new(server.url("/good.json"), "good"),
            RepositoryDescriptor::new(server.url("/html"), "html"),
            RepositoryDescriptor::new("not a url", "broken"),
        ]);

    let templates = registry.get_all_templates();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].label, "Good");
}

#[test]
fn enabled_only_skips_disabled_repositories() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/on.json");
        then.status(200).json_body(index(&[("On", None)]));
    });
    let off = server.mock(|when, then| {
        when.method(GET).path("/off.json");
        then.status(200).json_body(index(&[("Off", None)]));
    });

    let registry = TemplateRegistry::in_memory(Arc::new(HttpFetcher::new().unwrap()))
        .with_default_repositories(vec![
            RepositoryDescriptor::new(server.url("/on.json"), "on"),
            RepositoryDescriptor::new(server.url("/off.json"), "off").with_enabled(false),
        ]);

    let templates = registry.get_templates(&TemplateQuery::all().enabled_only(true));

    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].label, "On");
    off.assert_calls(0);
}

#[test]
fn extension_repositories_are_fetched_once() {
    let server = MockServer::start();
    let shared = server.mock(|when, then| {
        when.method(GET).path("/shared.json");
        then.status(200).json_body(index(&[("Shared", None)]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/stacks.json");
        then.status(200)
            .json_body(index(&[("Stack", Some("Appsody"))]));
    });

    let registry = TemplateRegistry::in_memory(Arc::new(HttpFetcher::new().unwrap()))
        .with_default_repositories(vec![RepositoryDescriptor::new(
            server.url("/shared.json"),
            "shared",
        )]);
    registry
        .add_extension(
            "appsody",
            Arc::new(StaticRepositoryProvider::new(vec![
                RepositoryDescriptor::new(server.url("/shared.json"), "dup"),
                RepositoryDescriptor::new(server.url("/stacks.json"), "stacks"),
            ])),
        )
        .unwrap();

    assert_eq!(registry.get_template_styles(), ["Codewind", "Appsody"]);
    shared.assert_calls(1);

    registry
        .batch_update_extensions(&[ExtensionOperation::enable("appsody", false)])
        .unwrap();
    assert_eq!(registry.get_template_styles(), ["Codewind"]);
}

#[test]
fn repository_changes_persist_across_reopen() {
    let temp = TempDir::new().unwrap();
    let paths = ConfigPaths::new(temp.path());
    let settings = settings_for(vec![RepositoryDescriptor::new("https://seed", "seed")]);

    {
        let registry = TemplateRegistry::open(&paths, &settings).unwrap();
        registry.add_repository("https://added", "added").unwrap();
        let results = registry
            .batch_update_repos(&[
                RepositoryOperation::enable("https://seed", false),
                RepositoryOperation::enable("https://unknown", true),
            ])
            .unwrap();
        assert_eq!(results[0].status, 200);
        assert_eq!(results[1].status, 404);
    }

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(paths.repository_list()).unwrap()).unwrap();
    assert_eq!(
        saved,
        json!([
            {"url": "https://seed", "description": "seed", "enabled": false},
            {"url": "https://added", "description": "added", "enabled": true}
        ])
    );

    let reopened = TemplateRegistry::open(&paths, &settings).unwrap();
    let urls: Vec<_> = reopened
        .get_enabled_repositories()
        .into_iter()
        .map(|r| r.url)
        .collect();
    assert_eq!(urls, ["https://added"]);
}

#[test]
fn extension_settings_persist_across_reopen() {
    let temp = TempDir::new().unwrap();
    let paths = ConfigPaths::new(temp.path());
    let settings = RegistrySettings {
        extensions: vec![ExtensionConfig {
            name: "appsody".into(),
            description: Some("Appsody stacks".into()),
            ..Default::default()
        }],
        ..Default::default()
    };

    TemplateRegistry::open(&paths, &settings)
        .unwrap()
        .disable_extension("appsody")
        .unwrap();

    let reopened = TemplateRegistry::open(&paths, &settings).unwrap();
    let extensions = reopened.get_template_extensions();
    assert_eq!(extensions.len(), 1);
    assert_eq!(extensions[0].description, "Appsody stacks");
    assert!(!extensions[0].enabled);
}

#[test]
fn corrupt_repository_list_keeps_defaults() {
    let temp = TempDir::new().unwrap();
    let paths = ConfigPaths::new(temp.path());
    fs::create_dir_all(paths.config_dir()).unwrap();
    fs::write(paths.repository_list(), "{ not json").unwrap();

    let registry = TemplateRegistry::open(
        &paths,
        &settings_for(vec![RepositoryDescriptor::new("https://seed", "seed")]),
    )
    .unwrap();

    assert_eq!(
        registry.get_repositories(),
        vec![RepositoryDescriptor::new("https://seed", "seed")]
    );
    // The unreadable file is left alone.
    assert_eq!(
        fs::read_to_string(paths.repository_list()).unwrap(),
        "{ not json"
    );
}
