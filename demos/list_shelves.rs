//! List the bookshelves of the authenticated user.
//!
//! Run:
//! `BOOKS_ACCESS_TOKEN=<token> cargo run --example list_shelves`
//!
//! Optional env vars:
//! - `BOOKS_BASE_URL` (defaults to the public endpoint)

use books_client::{Client, ShelvesListOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = match std::env::var("BOOKS_ACCESS_TOKEN") {
        Ok(value) => value,
        Err(_) => {
            eprintln!("Set BOOKS_ACCESS_TOKEN before running this example.");
            std::process::exit(2);
        }
    };

    let mut builder = Client::builder().bearer_token(token);
    if let Ok(url) = std::env::var("BOOKS_BASE_URL") {
        builder = builder.base_url(url);
    }
    let client = builder.build()?;

    let (shelves, _) = client.shelves().list(Some(&ShelvesListOptions::default()))?;
    for shelf in shelves {
        println!(
            "Id: {}, Title: {}, VolumeCount: {}",
            shelf.id.unwrap_or_default(),
            shelf.title.unwrap_or_default(),
            shelf.volume_count.unwrap_or_default()
        );
    }
    Ok(())
}
