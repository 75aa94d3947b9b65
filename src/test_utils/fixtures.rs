//! Markup shaped like what wiki TOC macros render.

use crate::dom::Page;

pub fn page(body: &str, location: &str) -> Page {
    Page::parse(
        &format!("<!DOCTYPE html><html><head><title>Wiki</title></head><body>{body}</body></html>"),
        location,
    )
}

/// A `toc-macro` block with two top-level sections, the first with two children.
pub fn toc_macro() -> String {
    r##"<div class="toc-macro client-side-toc-macro">
  <ul>
    <li><a href="#Overview">Overview</a>
      <ul>
        <li><a href="#Goals">Goals</a></li>
        <li><a href="#Scope">Scope</a></li>
      </ul>
    </li>
    <li><a href="#Design">Design</a></li>
  </ul>
</div>"##
        .to_string()
}

/// Same outline wrapped in an extra list level that carries no meaning.
pub fn wrapped_toc_macro() -> String {
    r##"<div data-macro-name="toc">
  <ul><li>
    <ul>
      <li><a href="#Overview">Overview</a>
        <ol><li><a href="#Goals">Goals</a></li></ol>
      </li>
    </ul>
  </li></ul>
</div>"##
        .to_string()
}

pub fn article(toc: &str) -> String {
    format!(
        r##"<div id="main-content">
  <h1>Release notes</h1>
  {toc}
  <h2 id="Overview">Overview</h2>
  <p>Text.</p>
</div>"##
    )
}
