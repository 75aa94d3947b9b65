use anyhow::{Context, Result};
use cftoc::config::CONTAINER_ID;
use cftoc::parsing::detector;
use cftoc::types::outline_to_json;
use cftoc::{ManualScheduler, Page, TocSupervisor, dom};
use std::env;
use std::fs;
use std::rc::Rc;

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--log") {
        args.remove(pos);
        cftoc::logging::init_file_logger("cftoc.log")?;
    }
    let path = args
        .first()
        .context("Usage: toc_inspector [--log] <page.html> [location]")?;
    let location = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| format!("file://{path}"));

    let html = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    let page = Rc::new(Page::parse(&html, location));

    println!("Page: {}", page.location());
    match detector::detect_with_pattern(&page) {
        Some((index, container)) => {
            println!(
                "Container: pattern #{index} ({:?}) on <{}>",
                detector::TOC_PATTERNS[index],
                dom::tag_name(&container).unwrap_or("?")
            );
        }
        None => {
            println!("No TOC container on this page.");
            return Ok(());
        }
    }

    let scheduler = Rc::new(ManualScheduler::new());
    let supervisor = TocSupervisor::new(page.clone(), scheduler.clone());
    supervisor.start();
    scheduler.run_until_idle();

    let snapshot = supervisor.snapshot();
    println!("Timings: {}", serde_json::to_string(&supervisor.timings())?);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    if let Some(items) = cftoc::parsing::TocParser::parse_page(&page) {
        println!("\nOutline ({} entries):", items.len());
        println!("{}", outline_to_json(&items));
    }

    if let Some(root) = page.element_by_id(CONTAINER_ID) {
        println!("\nMounted markup:");
        println!("{}", dom::serialize_children(&root));
    }

    Ok(())
}
