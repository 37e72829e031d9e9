use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const TUTORIAL: &str = "\
# Welcome to the Tutorial\n\n\
Some intro text.\n\n\
## Installation\n\n\
Run `yarn install` to get going.\n\n\
## Our First Page\n\n\
More text here.\n";

const NEWS: &str = "\
# [Big Release](https://example.com/release)\n\n\
## April 14, 2020\n\n\
### Everything is new.\n\n\
#### Article\n";

const TESTIMONIALS: &str = "\
# Alex Example\n\n\
## https://example.com/alex.png\n\n\
### https://social.example/alex\n\n\
#### Twitter\n\n\
Shipped our docs in a day.\n";

fn write_site(dir: &Path) {
    fs::write(
        dir.join("docsmith.yml"),
        r#"
site:
  title: "Example Docs"
  html_root: "out"
books:
  - book: tutorial
    source:
      path: TUTORIAL.md
    page_break_depths: [1, 2]
news:
  source:
    path: NEWS.md
testimonials:
  source:
    path: TESTIMONIALS.md
"#,
    )
    .unwrap();
    fs::write(dir.join("TUTORIAL.md"), TUTORIAL).unwrap();
    fs::write(dir.join("NEWS.md"), NEWS).unwrap();
    fs::write(dir.join("TESTIMONIALS.md"), TESTIMONIALS).unwrap();
}

#[test]
fn build_writes_pages_nav_and_feeds() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path());

    Command::cargo_bin("docsmith")?
        .current_dir(dir.path())
        .args(["build"])
        .assert()
        .success();

    let out = dir.path().join("out");

    let installation = fs::read_to_string(out.join("tutorial/installation.html"))?;
    assert!(installation.contains("yarn install"));
    assert!(installation.contains("<title>Tutorial - Installation</title>"));
    // Next-page link points at the following page
    assert!(installation.contains("/tutorial/our-first-page.html"));

    assert!(out.join("tutorial/welcome-to-the-tutorial.html").exists());
    assert!(out.join("tutorial/our-first-page.html").exists());

    let nav = fs::read_to_string(out.join("tutorial/_nav.html"))?;
    assert!(nav.contains("/tutorial/welcome-to-the-tutorial.html"));
    assert!(nav.contains("/tutorial/installation.html"));
    assert!(nav.contains("/tutorial/our-first-page.html"));

    let news = fs::read_to_string(out.join("news.html"))?;
    assert!(news.contains("Big Release"));
    assert!(news.contains("April 14, 2020"));

    let testimonials = fs::read_to_string(out.join("_testimonials.html"))?;
    assert!(testimonials.contains("Alex Example"));
    assert!(testimonials.contains("Shipped our docs in a day."));

    Ok(())
}

#[test]
fn build_fails_when_a_source_is_missing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("docsmith.yml"),
        r#"
site:
  title: "Example Docs"
  html_root: "out"
books:
  - book: tutorial
    source:
      path: MISSING.md
"#,
    )?;

    Command::cargo_bin("docsmith")?
        .current_dir(dir.path())
        .args(["build"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch source"));

    Ok(())
}

#[test]
fn build_continues_past_a_malformed_book() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("docsmith.yml"),
        r#"
site:
  title: "Example Docs"
  html_root: "out"
books:
  - book: broken
    source:
      path: BROKEN.md
  - book: guide
    source:
      path: GUIDE.md
    page_break_depths: [1]
"#,
    )?;
    fs::write(dir.path().join("BROKEN.md"), "no headings at all\n")?;
    fs::write(dir.path().join("GUIDE.md"), "# Fine\n\nContent.\n")?;

    Command::cargo_bin("docsmith")?
        .current_dir(dir.path())
        .args(["build"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to build"));

    // The healthy book still built
    assert!(dir.path().join("out/guide/fine.html").exists());
    assert!(!dir.path().join("out/broken").join("_nav.html").exists());

    Ok(())
}

#[test]
fn split_prints_page_breakdown() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path());

    Command::cargo_bin("docsmith")?
        .current_dir(dir.path())
        .args(["split", "tutorial"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tutorial/installation.html"))
        .stdout(predicate::str::contains("3 pages"));

    Ok(())
}

#[test]
fn index_json_emits_records() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path());

    let assert = Command::cargo_bin("docsmith")?
        .current_dir(dir.path())
        .args(["index", "tutorial", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let records: Value = serde_json::from_str(&stdout)?;
    let records = records.as_array().expect("json array");

    assert!(!records.is_empty());
    let first = &records[0];
    assert!(first.get("objectID").is_some());
    assert_eq!(first["book"], "tutorial");
    assert_eq!(first["chapter"], "Welcome to the Tutorial");

    Ok(())
}

#[test]
fn unknown_book_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_site(dir.path());

    Command::cargo_bin("docsmith")?
        .current_dir(dir.path())
        .args(["split", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No book 'nope'"));

    Ok(())
}
