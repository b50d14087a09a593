//! Move the keywords of one category into a text field for every file in an
//! album.
//!
//! Usage:
//!   cargo run --example move_keywords -- <base-url> <album-id> <category-id> <field-id>

use lightbox_client::LightboxApi;

#[tokio::main(flavor = "current_thread")]
async fn main() -> lightbox_client::Result<()> {
    let mut args = std::env::args().skip(1);
    let base_url = args.next().unwrap_or_else(|| "demo.lightboxdam.com".into());
    let album: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);
    let category: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);
    let field: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);

    let mut api = LightboxApi::new(&base_url)?;
    let report = api
        .move_keywords_to_field_by_album(album, category, field, "; ", "append", None)
        .await?;

    println!(
        "updated {} file(s) across {} batch(es), {} failed",
        report.files_updated, report.iterations, report.batches_failed
    );
    Ok(())
}
