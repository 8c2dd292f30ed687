//! Tests for the fetcher driver loop.

use super::*;
use crate::exit_codes;
use crate::test_support::{Sandbox, mode, serve, tar_gz};
use std::fs;
use tempfile::TempDir;

fn request_for(sandbox: &Sandbox, descriptors: Vec<ResourceDescriptor>) -> FetchRequest {
    FetchRequest::new(descriptors, &sandbox.work)
}

#[test]
fn test_local_path_no_extract_not_executable() {
    let sandbox = Sandbox::new();
    let source = sandbox.source_file("test", b"data");

    let descriptor = ResourceDescriptor::new(source.to_str().unwrap())
        .executable(false)
        .extract(false);
    run(&request_for(&sandbox, vec![descriptor])).unwrap();

    let fetched = sandbox.work.join("test");
    assert_eq!(fs::read(&fetched).unwrap(), b"data");
    assert_eq!(mode(&fetched) & 0o111, 0);
}

#[test]
fn test_local_path_executable() {
    let sandbox = Sandbox::new();
    let source = sandbox.source_file("tool", b"#!/bin/sh\n");

    let descriptor = ResourceDescriptor::new(source.to_str().unwrap())
        .executable(true)
        .extract(false);
    run(&request_for(&sandbox, vec![descriptor])).unwrap();

    let fetched = sandbox.work.join("tool");
    assert_eq!(mode(&fetched) & 0o111, 0o111);
    assert_eq!(fs::read(&fetched).unwrap(), b"#!/bin/sh\n");
}

#[test]
fn test_tar_gz_extracted_into_work_directory() {
    let sandbox = Sandbox::new();
    let source = sandbox.source_file("bundle.tar.gz", &tar_gz("hello", b"hello world"));

    let descriptor = ResourceDescriptor::new(source.to_str().unwrap()).extract(true);
    run(&request_for(&sandbox, vec![descriptor])).unwrap();

    let member = sandbox.work.join("hello");
    assert_eq!(fs::read_to_string(&member).unwrap(), "hello world");
    assert_eq!(mode(&member) & 0o111, 0);
    assert!(sandbox.work.join("bundle.tar.gz").exists());
}

#[test]
fn test_executable_flag_ignored_for_extracted_archive() {
    let sandbox = Sandbox::new();
    let source = sandbox.source_file("bundle.tar.gz", &tar_gz("hello", b"hello world"));

    let descriptor = ResourceDescriptor::new(source.to_str().unwrap())
        .executable(true)
        .extract(true);
    run(&request_for(&sandbox, vec![descriptor])).unwrap();

    assert_eq!(mode(&sandbox.work.join("bundle.tar.gz")) & 0o111, 0);
    assert_eq!(mode(&sandbox.work.join("hello")) & 0o111, 0);
}

#[test]
fn test_executable_applies_when_extract_finds_no_archive() {
    let sandbox = Sandbox::new();
    let source = sandbox.source_file("runner", b"#!/bin/sh\n");

    let descriptor = ResourceDescriptor::new(source.to_str().unwrap()).executable(true);
    run(&request_for(&sandbox, vec![descriptor])).unwrap();

    assert_eq!(mode(&sandbox.work.join("runner")) & 0o111, 0o111);
}

#[test]
fn test_http_descriptor() {
    let (base, server) = serve("200 OK", b"help text", 1);
    let sandbox = Sandbox::new();

    let descriptor = ResourceDescriptor::new(format!("{}/help", base)).extract(false);
    run(&request_for(&sandbox, vec![descriptor])).unwrap();

    server.join().unwrap();
    assert_eq!(fs::read(sandbox.work.join("help")).unwrap(), b"help text");
}

#[test]
fn test_repeated_file_uri_fetch_is_byte_identical() {
    let sandbox = Sandbox::new();
    let content: Vec<u8> = (0..=255).cycle().take(10_000).collect();
    let source = sandbox.source_file("blob.bin", &content);
    let uri = format!("file://{}", source.display());

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let work = TempDir::new().unwrap();
        let request = FetchRequest::new(
            vec![ResourceDescriptor::new(uri.as_str()).extract(false)],
            work.path(),
        );
        run(&request).unwrap();
        outputs.push(fs::read(work.path().join("blob.bin")).unwrap());
    }

    assert_eq!(outputs[0], content);
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn test_failure_aborts_queue_and_keeps_prior_artifacts() {
    let sandbox = Sandbox::new();
    let first = sandbox.source_file("first", b"1");
    let third = sandbox.source_file("third", b"3");
    let missing = sandbox.from.join("missing");

    let request = request_for(&sandbox, vec![
        ResourceDescriptor::new(first.to_str().unwrap()).extract(false),
        ResourceDescriptor::new(missing.to_str().unwrap()).extract(false),
        ResourceDescriptor::new(third.to_str().unwrap()).extract(false),
    ]);
    let err = run(&request).unwrap_err();

    assert_eq!(err.exit_code(), exit_codes::FETCH_FAILURE);
    assert!(err.to_string().contains("missing"));
    assert!(sandbox.work.join("first").exists());
    assert!(!sandbox.work.join("third").exists());
}

#[test]
fn test_corrupt_archive_is_extraction_failure() {
    let sandbox = Sandbox::new();
    let source = sandbox.source_file("broken.tgz", b"not an archive");

    let request = request_for(&sandbox, vec![ResourceDescriptor::new(source.to_str().unwrap())]);
    let err = run(&request).unwrap_err();

    assert_eq!(err.exit_code(), exit_codes::EXTRACTION_FAILURE);
    assert!(sandbox.work.join("broken.tgz").exists());
}

#[test]
fn test_unsupported_scheme_is_fetch_failure() {
    let sandbox = Sandbox::new();

    let request = request_for(&sandbox, vec![ResourceDescriptor::new("ftp://example.com/file")]);
    let err = run(&request).unwrap_err();

    assert_eq!(err.exit_code(), exit_codes::FETCH_FAILURE);
}

#[test]
fn test_missing_work_directory_is_configuration_error() {
    let sandbox = Sandbox::new();
    let source = sandbox.source_file("test", b"data");

    let request = FetchRequest::new(
        vec![ResourceDescriptor::new(source.to_str().unwrap())],
        sandbox.work.join("does-not-exist"),
    );
    let err = run(&request).unwrap_err();

    assert_eq!(err.exit_code(), exit_codes::CONFIGURATION_ERROR);
}

#[test]
fn test_empty_descriptor_list_succeeds() {
    let sandbox = Sandbox::new();

    run(&request_for(&sandbox, Vec::new())).unwrap();

    assert_eq!(fs::read_dir(&sandbox.work).unwrap().count(), 0);
}

#[test]
fn test_unknown_user_is_permission_failure_after_fetching() {
    let sandbox = Sandbox::new();
    let source = sandbox.source_file("test", b"data");

    let request = request_for(&sandbox, vec![ResourceDescriptor::new(source.to_str().unwrap())])
        .with_user(Some("no-such-user-for-fetcher-tests".to_string()));
    let err = run(&request).unwrap_err();

    assert_eq!(err.exit_code(), exit_codes::PERMISSION_FAILURE);
    assert!(sandbox.work.join("test").exists());
}
