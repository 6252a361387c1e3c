use crate::{
    cli::{prompt, render, search},
    error::Result,
    spotify::{self, SpotifyClient},
    success,
    types::Track,
    warning,
};

pub async fn view(client: &SpotifyClient) -> Result<()> {
    let queue = spotify::queue::get_queue(client).await?;
    render::queue(&queue);
    Ok(())
}

async fn enqueue_one_of(client: &SpotifyClient, tracks: &[Track]) -> Result<()> {
    render::tracks(tracks);
    let Some(i) = prompt::choice("Enter track number to add to queue (or 0 to cancel): ", tracks.len())
    else {
        return Ok(());
    };
    let track = &tracks[i];
    if spotify::queue::add_to_queue(client, &track.uri, None).await? {
        success!("'{}' added to queue.", track.name);
    } else {
        warning!("Failed to add track to queue.");
    }
    Ok(())
}

pub async fn add_track(client: &SpotifyClient) -> Result<()> {
    let Some(query) = prompt::text("\nEnter search query: ") else {
        return Ok(());
    };
    let page = spotify::search::search_tracks(client, &query, 10).await?;
    if page.is_empty() {
        warning!("No tracks found.");
        return Ok(());
    }
    enqueue_one_of(client, &page.items).await
}

/// Picks an artist, then one of their top tracks.
pub async fn add_artist_track(client: &SpotifyClient) -> Result<()> {
    let Some(artist) = search::pick_artist(client).await? else {
        return Ok(());
    };
    let tracks = search::top_tracks_of(client, &artist).await?;
    if tracks.is_empty() {
        warning!("No tracks found for {}.", artist.name);
        return Ok(());
    }
    enqueue_one_of(client, &tracks).await
}
