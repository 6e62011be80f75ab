//! List the notes made in one volume, one page at a time.
//!
//! Run:
//! `BOOKS_ACCESS_TOKEN=<token> cargo run --example list_annotations -- <volume-id> <content-version>`

use books_client::{AnnotationsListOptions, Client};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Ok(token) = std::env::var("BOOKS_ACCESS_TOKEN") else {
        eprintln!("Set BOOKS_ACCESS_TOKEN before running this example.");
        std::process::exit(2);
    };
    let mut args = std::env::args().skip(1);
    let (Some(volume_id), Some(content_version)) = (args.next(), args.next()) else {
        eprintln!("usage: list_annotations <volume-id> <content-version>");
        std::process::exit(2);
    };

    let client = Client::builder()
        .bearer_token(token)
        .user_agent("list-annotations-demo")
        .build()?;

    let options = AnnotationsListOptions {
        volume_id,
        content_version,
        layer_id: "notes".into(),
        max_results: 10,
        fields: "items(layerId,selectedText,volumeId),nextPageToken,totalItems".into(),
        ..Default::default()
    };

    let (notes, response) = client.annotations().list(Some(&options))?;
    for (idx, note) in notes.iter().enumerate() {
        println!("{idx} - {}", note.selected_text.as_deref().unwrap_or_default());
    }
    if let Some(token) = response.next_page_token {
        println!("more notes available, next page token: {token}");
    }
    Ok(())
}
