use crate::{
    cli::{prompt, render},
    error::Result,
    info,
    spotify::{self, SpotifyClient},
    success, utils, warning,
};

/// Saved tracks, used by `--list` and the menu.
pub async fn saved_tracks(client: &SpotifyClient, limit: u32) -> Result<()> {
    let spinner = utils::spinner("Fetching your saved tracks...");
    let page = spotify::library::get_saved_tracks(client, limit, 0).await;
    spinner.finish_and_clear();
    let page = page?;

    if page.is_empty() {
        warning!("Your library has no saved tracks.");
        return Ok(());
    }
    info!("Your saved tracks ({} of {})", page.count(), page.total);
    render::tracks(&page.items);
    Ok(())
}

pub async fn remove_track(client: &SpotifyClient) -> Result<()> {
    let page = spotify::library::get_saved_tracks(client, 20, 0).await?;
    if page.is_empty() {
        warning!("Your library has no saved tracks.");
        return Ok(());
    }
    render::tracks(&page.items);

    let Some(i) = prompt::choice("Enter track number to remove (or 0 to cancel): ", page.count())
    else {
        return Ok(());
    };
    let track = &page.items[i];
    if spotify::library::remove_tracks(client, &[track.id.as_str()]).await? {
        success!("'{}' removed from your library.", track.name);
    } else {
        warning!("Failed to remove track.");
    }
    Ok(())
}

pub async fn check_track(client: &SpotifyClient) -> Result<()> {
    let Some(query) = prompt::text("\nEnter track name: ") else {
        return Ok(());
    };
    let page = spotify::search::search_tracks(client, &query, 10).await?;
    if page.is_empty() {
        warning!("No tracks found.");
        return Ok(());
    }
    render::tracks(&page.items);

    let Some(i) = prompt::choice("Enter track number to check (or 0 to cancel): ", page.count())
    else {
        return Ok(());
    };
    let track = &page.items[i];
    if spotify::library::is_track_saved(client, &track.id).await? {
        success!("'{}' is in your library.", track.name);
    } else {
        info!("'{}' is not in your library.", track.name);
    }
    Ok(())
}

pub async fn saved_albums(client: &SpotifyClient) -> Result<()> {
    let page = spotify::library::get_saved_albums(client, 20, 0).await?;
    if page.is_empty() {
        warning!("Your library has no saved albums.");
        return Ok(());
    }
    info!("Your saved albums ({} of {})", page.count(), page.total);
    render::albums(&page.items);
    Ok(())
}

pub async fn save_album(client: &SpotifyClient) -> Result<()> {
    let Some(query) = prompt::text("\nEnter album name: ") else {
        return Ok(());
    };
    let page = spotify::search::search_albums(client, &query, 10).await?;
    if page.is_empty() {
        warning!("No albums found.");
        return Ok(());
    }
    render::albums(&page.items);

    let Some(i) = prompt::choice("Enter album number to save (or 0 to cancel): ", page.count())
    else {
        return Ok(());
    };
    let album = &page.items[i];
    if spotify::library::save_albums(client, &[album.id.as_str()]).await? {
        success!("'{}' saved to your library!", album.name);
    } else {
        warning!("Failed to save album.");
    }
    Ok(())
}

pub async fn remove_album(client: &SpotifyClient) -> Result<()> {
    let page = spotify::library::get_saved_albums(client, 20, 0).await?;
    if page.is_empty() {
        warning!("Your library has no saved albums.");
        return Ok(());
    }
    render::albums(&page.items);

    let Some(i) = prompt::choice("Enter album number to remove (or 0 to cancel): ", page.count())
    else {
        return Ok(());
    };
    let album = &page.items[i];
    if spotify::library::remove_albums(client, &[album.id.as_str()]).await? {
        success!("'{}' removed from your library.", album.name);
    } else {
        warning!("Failed to remove album.");
    }
    Ok(())
}

pub async fn check_album(client: &SpotifyClient) -> Result<()> {
    let Some(query) = prompt::text("\nEnter album name: ") else {
        return Ok(());
    };
    let page = spotify::search::search_albums(client, &query, 10).await?;
    if page.is_empty() {
        warning!("No albums found.");
        return Ok(());
    }
    render::albums(&page.items);

    let Some(i) = prompt::choice("Enter album number to check (or 0 to cancel): ", page.count())
    else {
        return Ok(());
    };
    let album = &page.items[i];
    if spotify::library::is_album_saved(client, &album.id).await? {
        success!("'{}' is in your library.", album.name);
    } else {
        info!("'{}' is not in your library.", album.name);
    }
    Ok(())
}

pub async fn profile(client: &SpotifyClient) -> Result<()> {
    let profile = spotify::user::get_current_user_profile(client).await?;
    println!();
    render::profile(&profile);
    Ok(())
}
