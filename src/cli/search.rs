use crate::{
    cli::{SearchKind, prompt, render},
    error::Result,
    info,
    spotify::{self, SpotifyClient},
    success,
    types::{Artist, Track},
    utils, warning,
};

/// Market used for artist top tracks.
const TOP_TRACKS_MARKET: &str = "US";

/// One-shot search for the command line flags.
pub async fn search(client: &SpotifyClient, kind: SearchKind, query: &str, limit: u32) -> Result<()> {
    let spinner = utils::spinner(&format!("Searching for '{}'...", query));
    let found = match kind {
        SearchKind::Track => {
            let page = spotify::search::search_tracks(client, query, limit).await;
            spinner.finish_and_clear();
            let page = page?;
            if !page.is_empty() {
                render::tracks(&page.items);
            }
            (page.count(), page.total)
        }
        SearchKind::Artist => {
            let page = spotify::search::search_artists(client, query, limit).await;
            spinner.finish_and_clear();
            let page = page?;
            if !page.is_empty() {
                render::artists(&page.items);
            }
            (page.count(), page.total)
        }
        SearchKind::Album => {
            let page = spotify::search::search_albums(client, query, limit).await;
            spinner.finish_and_clear();
            let page = page?;
            if !page.is_empty() {
                render::albums(&page.items);
            }
            (page.count(), page.total)
        }
        SearchKind::Playlist => {
            let page = spotify::search::search_playlists(client, query, limit).await;
            spinner.finish_and_clear();
            let page = page?;
            if !page.is_empty() {
                render::playlists(&page.items);
            }
            (page.count(), page.total)
        }
    };

    match found {
        (0, _) => warning!("No results for '{}'.", query),
        (count, total) => info!("Showing {} of {} results.", count, total),
    }
    Ok(())
}

/// Searches tracks and offers to save one of them.
pub async fn search_and_save(client: &SpotifyClient) -> Result<()> {
    let Some(query) = prompt::text("\nEnter track name: ") else {
        return Ok(());
    };
    let page = spotify::search::search_tracks(client, &query, 10).await?;
    if page.is_empty() {
        warning!("No tracks found.");
        return Ok(());
    }

    info!("Found {} results (total: {})", page.count(), page.total);
    render::tracks(&page.items);

    let Some(i) = prompt::choice("Enter track number to save (or 0 to cancel): ", page.count()) else {
        return Ok(());
    };
    let track = &page.items[i];
    if spotify::library::save_tracks(client, &[track.id.as_str()]).await? {
        success!("'{}' saved to your library!", track.name);
    } else {
        warning!("Failed to save track.");
    }
    Ok(())
}

pub async fn search_artists(client: &SpotifyClient) -> Result<()> {
    let Some(query) = prompt::text("\nEnter artist name: ") else {
        return Ok(());
    };
    search(client, SearchKind::Artist, &query, 10).await
}

pub async fn search_albums(client: &SpotifyClient) -> Result<()> {
    let Some(query) = prompt::text("\nEnter album name: ") else {
        return Ok(());
    };
    search(client, SearchKind::Album, &query, 10).await
}

/// Searches artists by name and lets the user pick one.
pub(crate) async fn pick_artist(client: &SpotifyClient) -> Result<Option<Artist>> {
    let Some(query) = prompt::text("\nEnter artist name: ") else {
        return Ok(None);
    };
    let page = spotify::search::search_artists(client, &query, 10).await?;
    if page.is_empty() {
        warning!("No artists found.");
        return Ok(None);
    }

    render::artists(&page.items);
    let picked = prompt::choice("Enter artist number (or 0 to cancel): ", page.count());
    Ok(picked.map(|i| page.items[i].clone()))
}

pub async fn artist_albums(client: &SpotifyClient) -> Result<()> {
    let Some(artist) = pick_artist(client).await? else {
        return Ok(());
    };
    let albums = spotify::artists::get_artist_albums(client, &artist.id, 20).await?;
    if albums.is_empty() {
        warning!("No albums found for {}.", artist.name);
        return Ok(());
    }
    info!("Albums by {} ({} total)", artist.name, albums.total);
    render::albums(&albums.items);
    Ok(())
}

pub async fn artist_top_tracks(client: &SpotifyClient) -> Result<()> {
    let Some(artist) = pick_artist(client).await? else {
        return Ok(());
    };
    let tracks = top_tracks_of(client, &artist).await?;
    if tracks.is_empty() {
        warning!("No tracks found for {}.", artist.name);
        return Ok(());
    }
    info!("Top tracks by {}", artist.name);
    render::tracks(&tracks);
    Ok(())
}

pub(crate) async fn top_tracks_of(client: &SpotifyClient, artist: &Artist) -> Result<Vec<Track>> {
    Ok(spotify::artists::get_artist_top_tracks(client, &artist.id, TOP_TRACKS_MARKET)
        .await?
        .items)
}

/// Searches albums, then shows the tracks of the chosen one.
pub async fn album_details(client: &SpotifyClient) -> Result<()> {
    let Some(query) = prompt::text("\nEnter album name: ") else {
        return Ok(());
    };
    let page = spotify::search::search_albums(client, &query, 10).await?;
    if page.is_empty() {
        warning!("No albums found.");
        return Ok(());
    }
    render::albums(&page.items);

    let Some(i) = prompt::choice("Enter album number (or 0 to cancel): ", page.count()) else {
        return Ok(());
    };
    let detail = spotify::albums::get_album(client, &page.items[i].id).await?;
    println!();
    render::album_detail(&detail);
    Ok(())
}
