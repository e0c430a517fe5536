use course_scout::{extract_candidates, Error, Strategy};

const BASE: &str = "https://deals.example.com/all";

#[test]
fn union_covers_strategy_exclusive_courses() {
    // One course reachable only through its card (single-segment path, so
    // the raw pattern scan ignores it), one only through the raw scan (the
    // href lives inside script text), and one reachable through two
    // strategies at once (category link inside a card).
    let html = r#"
        <html><body>
          <div class="course-card">
            <h3>Weekend Special Bundle</h3>
            <a href="/weekend-special">Grab it</a>
          </div>
          <script>render('<a href="/cooking/italian-pasta">Pasta</a>')</script>
          <article class="deal-item">
            <a href="/development/learn-rust">Learn Rust Today</a>
          </article>
        </body></html>
    "#;

    let candidates = match extract_candidates(html, Some(BASE)) {
        Ok(c) => c,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert_eq!(candidates.len(), 3);

    let by_url: Vec<(&str, Strategy)> = candidates
        .iter()
        .map(|c| (c.coupon_url.as_str(), c.strategy))
        .collect();
    assert!(by_url.contains(&(
        "https://deals.example.com/weekend-special",
        Strategy::CardContainer
    )));
    assert!(by_url.contains(&(
        "https://deals.example.com/cooking/italian-pasta",
        Strategy::PatternMatch
    )));
    // Found by both CategoryLink and CardContainer; counted once, tagged
    // with the first strategy in declaration order.
    assert!(by_url.contains(&(
        "https://deals.example.com/development/learn-rust",
        Strategy::CategoryLink
    )));
}

#[test]
fn candidates_keep_page_encounter_order() {
    let html = r#"
        <html><body>
          <a href="/go/first-deal">First Course Offer</a>
          <a href="/go/second-deal">Second Course Offer</a>
          <a href="/go/third-deal">Third Course Offer</a>
        </body></html>
    "#;

    let candidates = match extract_candidates(html, Some(BASE)) {
        Ok(c) => c,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    let urls: Vec<&str> = candidates.iter().map(|c| c.coupon_url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://deals.example.com/go/first-deal",
            "https://deals.example.com/go/second-deal",
            "https://deals.example.com/go/third-deal",
        ]
    );
}

#[test]
fn malformed_document_degrades_instead_of_failing() {
    // Unclosed tags, stray quotes, a broken card. The structural passes
    // take what the parser salvages; the raw scan picks up the rest.
    let html = r#"
        <html><body>
          <div class="course-card><a href="/go/mangled-deal">Broken card</a>
          <a href="/design/still-found">Design Course</a
        </body>
    "#;

    let candidates = match extract_candidates(html, Some(BASE)) {
        Ok(c) => c,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    assert!(
        candidates
            .iter()
            .any(|c| c.coupon_url.ends_with("/go/mangled-deal")),
        "raw scan should recover the mangled redirect link"
    );
}

#[test]
fn navigation_and_chrome_links_are_excluded() {
    let html = r#"
        <html><body>
          <div class="card">
            <a href="/about">About</a>
            <a href="/tag/python/new">Tagged</a>
            <a href="javascript:void(0)">Menu</a>
            <a href="/login">Sign in</a>
          </div>
        </body></html>
    "#;

    let candidates = match extract_candidates(html, Some(BASE)) {
        Ok(c) => c,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    assert!(candidates.is_empty());
}

#[test]
fn relative_links_without_base_are_dropped() {
    let html = r#"<html><body><a href="/go/abc">Get course</a></body></html>"#;
    let candidates = match extract_candidates(html, None) {
        Ok(c) => c,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    assert!(candidates.is_empty());
}

#[test]
fn missing_document_is_fatal() {
    assert!(matches!(extract_candidates("", Some(BASE)), Err(Error::MissingDocument)));
    assert!(matches!(
        extract_candidates("  \n  ", Some(BASE)),
        Err(Error::MissingDocument)
    ));
}
