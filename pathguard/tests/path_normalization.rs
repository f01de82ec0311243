//! Integration tests for path normalization and the upload root.

mod common;

use common::SiteFixture;
use pathguard::uploads::UploadDirProvider;
use pathguard::{resolve_upload_root, DefaultUploadDir, PathGuard};
use std::path::PathBuf;

#[test]
fn test_relative_and_empty_inputs_anchor_at_content_dir() {
    let site = SiteFixture::new();
    let guard = PathGuard::new(site.host.clone());
    let content = site.content();

    assert_eq!(guard.normalize("").unwrap().as_str(), format!("{content}/"));
    assert_eq!(guard.normalize("/").unwrap().as_str(), format!("{content}/"));
    assert_eq!(
        guard.normalize("backups").unwrap().as_str(),
        format!("{content}/backups")
    );
}

#[test]
fn test_trailing_slash_is_preserved() {
    let site = SiteFixture::new();
    let guard = PathGuard::new(site.host.clone());

    assert!(guard.normalize("uploads/").unwrap().has_trailing_slash());
    assert!(!guard.normalize("uploads").unwrap().has_trailing_slash());
    assert!(guard.normalize("missing/dir/").unwrap().has_trailing_slash());
}

#[test]
fn test_backslashes_match_forward_slashes() {
    let site = SiteFixture::new();
    let guard = PathGuard::new(site.host.clone());

    assert_eq!(
        guard.normalize("uploads\\2024\\01").unwrap(),
        guard.normalize("uploads/2024/01").unwrap()
    );
}

#[test]
fn test_normalization_is_idempotent() {
    let site = SiteFixture::new();
    let guard = PathGuard::new(site.host.clone());

    for raw in ["backups", "uploads/../x/", "./a/./b", "../custom", "plugins/.."] {
        let once = guard.normalize(raw).unwrap();
        let twice = guard.normalize(once.as_str()).unwrap();
        assert_eq!(once, twice, "{raw}");
    }
}

#[test]
fn test_dot_segments_are_resolved() {
    let site = SiteFixture::new();
    let guard = PathGuard::new(site.host.clone());
    let abspath = pathguard::path::to_forward_slashes(&site.host.abspath);

    assert_eq!(
        guard.normalize("uploads/../backups").unwrap().as_str(),
        format!("{}/backups", site.content())
    );
    assert_eq!(
        guard.normalize("new/../../custom").unwrap().as_str(),
        format!("{abspath}/custom")
    );
}

#[cfg(unix)]
#[test]
fn test_symlinked_ancestor_is_real_pathed() {
    use std::fs;
    use std::os::unix::fs::symlink;

    let site = SiteFixture::new();
    let target = site.root().join("storage");
    fs::create_dir(&target).unwrap();
    symlink(&target, site.content_path("linked")).unwrap();
    let guard = PathGuard::new(site.host.clone());

    let normalized = guard.normalize("linked/backups").unwrap();
    assert_eq!(
        normalized.as_str(),
        format!("{}/storage/backups", site.root().to_string_lossy())
    );
}

#[test]
fn test_upload_root_single_site() {
    let site = SiteFixture::new();
    let provider = DefaultUploadDir::new(&site.host.content_dir);

    let root = resolve_upload_root(&site.host, &provider);
    assert_eq!(root.as_str(), format!("{}/uploads/", site.content()));
}

#[test]
fn test_upload_root_custom_provider() {
    struct MediaMount(PathBuf);

    impl UploadDirProvider for MediaMount {
        fn base_dir(&self) -> PathBuf {
            self.0.clone()
        }
    }

    let site = SiteFixture::new();
    let media = site.root().join("media");
    let guard = PathGuard::new(site.host.clone()).with_upload_provider(MediaMount(media.clone()));

    assert_eq!(
        guard.resolve_upload_root().as_str(),
        format!("{}/", media.to_string_lossy())
    );
}

#[test]
fn test_upload_root_multisite_chain() {
    let mut site = SiteFixture::new();
    site.host.multisite = true;
    let guard = PathGuard::new(site.host.clone());
    assert_eq!(
        guard.resolve_upload_root().as_str(),
        format!("{}/uploads/", site.content())
    );

    site.mkdir("uploads/sites");
    let guard = PathGuard::new(site.host.clone());
    assert_eq!(
        guard.resolve_upload_root().as_str(),
        format!("{}/uploads/sites/", site.content())
    );

    site.host.upload_blogs_dir = Some("wp-content/blogs.dir".to_string());
    let guard = PathGuard::new(site.host.clone());
    assert_eq!(
        guard.resolve_upload_root().as_str(),
        format!("{}/blogs.dir/", site.content())
    );
}
