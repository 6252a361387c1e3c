use crate::{
    cli::{prompt, render},
    error::Result,
    info,
    spotify::{self, SpotifyClient},
    success,
    types::{Playlist, PlaylistUpdate},
    warning,
};

/// Track listing cap for playlist details.
const DETAIL_TRACKS: usize = 50;

async fn pick_playlist(client: &SpotifyClient) -> Result<Option<Playlist>> {
    let page = spotify::library::get_user_playlists(client, 50, 0).await?;
    if page.is_empty() {
        warning!("You have no playlists.");
        return Ok(None);
    }
    render::playlists(&page.items);
    let picked = prompt::choice("Enter playlist number (or 0 to cancel): ", page.count());
    Ok(picked.map(|i| page.items[i].clone()))
}

pub async fn list(client: &SpotifyClient) -> Result<()> {
    let page = spotify::library::get_user_playlists(client, 50, 0).await?;
    if page.is_empty() {
        warning!("You have no playlists.");
        return Ok(());
    }
    info!("Your playlists ({} of {})", page.count(), page.total);
    render::playlists(&page.items);
    Ok(())
}

pub async fn details(client: &SpotifyClient) -> Result<()> {
    let Some(playlist) = pick_playlist(client).await? else {
        return Ok(());
    };
    let detail = spotify::playlist::get_playlist(client, &playlist.id, true, DETAIL_TRACKS).await?;
    println!();
    render::playlist_detail(&detail);
    Ok(())
}

pub async fn create(client: &SpotifyClient) -> Result<()> {
    let Some(name) = prompt::text("\nPlaylist name: ") else {
        warning!("A playlist needs a name.");
        return Ok(());
    };
    let description = prompt::line("Description (optional): ").unwrap_or_default();
    let public = prompt::confirm("Make it public?");
    let collaborative = !public && prompt::confirm("Make it collaborative?");

    let user_id = spotify::user::get_current_user_id(client).await?;
    let created = spotify::playlist::create_playlist(
        client,
        &user_id,
        &name,
        &description,
        public,
        collaborative,
    )
    .await?;
    success!("Playlist '{}' created ({}).", created.name, created.id);
    Ok(())
}

/// Sub menu for renaming, describing and flipping the flags of a playlist.
pub async fn edit(client: &SpotifyClient) -> Result<()> {
    let Some(playlist) = pick_playlist(client).await? else {
        return Ok(());
    };

    println!("\nEditing '{}'", playlist.name);
    println!("1. Change name");
    println!("2. Change description");
    println!("3. Toggle public/private");
    println!("4. Toggle collaborative");
    println!("5. Cancel");

    match prompt::number::<u32>("Choose an option: ") {
        Some(1) => {
            let Some(name) = prompt::text("New name: ") else {
                return Ok(());
            };
            let update = PlaylistUpdate {
                name: Some(name),
                ..Default::default()
            };
            if spotify::playlist::update_playlist(client, &playlist.id, &update).await? {
                success!("Playlist renamed.");
            } else {
                warning!("Failed to rename playlist.");
            }
        }
        Some(2) => {
            let description = prompt::line("New description: ").unwrap_or_default();
            let update = PlaylistUpdate {
                description: Some(description),
                ..Default::default()
            };
            if spotify::playlist::update_playlist(client, &playlist.id, &update).await? {
                success!("Description updated.");
            } else {
                warning!("Failed to update description.");
            }
        }
        Some(3) => {
            let public = spotify::playlist::toggle_playlist_public(client, &playlist.id).await?;
            success!("Playlist is now {}.", if public { "public" } else { "private" });
        }
        Some(4) => {
            let collaborative =
                spotify::playlist::toggle_playlist_collaborative(client, &playlist.id).await?;
            success!(
                "Collaboration {}.",
                if collaborative { "enabled" } else { "disabled" }
            );
        }
        _ => {}
    }
    Ok(())
}

pub async fn add_track(client: &SpotifyClient) -> Result<()> {
    let Some(playlist) = pick_playlist(client).await? else {
        return Ok(());
    };
    let Some(query) = prompt::text("\nSearch track to add: ") else {
        return Ok(());
    };
    let page = spotify::search::search_tracks(client, &query, 10).await?;
    if page.is_empty() {
        warning!("No tracks found.");
        return Ok(());
    }
    render::tracks(&page.items);

    let Some(i) = prompt::choice("Enter track number to add (or 0 to cancel): ", page.count())
    else {
        return Ok(());
    };
    let track = &page.items[i];
    spotify::playlist::add_tracks_to_playlist(client, &playlist.id, &[track.uri.as_str()], None)
        .await?;
    success!("'{}' added to '{}'.", track.name, playlist.name);
    Ok(())
}

pub async fn remove_track(client: &SpotifyClient) -> Result<()> {
    let Some(playlist) = pick_playlist(client).await? else {
        return Ok(());
    };
    let detail = spotify::playlist::get_playlist(client, &playlist.id, true, DETAIL_TRACKS).await?;
    if detail.tracks.is_empty() {
        warning!("'{}' has no tracks.", playlist.name);
        return Ok(());
    }
    render::tracks(&detail.tracks);

    let Some(i) = prompt::choice("Enter track number to remove (or 0 to cancel): ", detail.tracks.len())
    else {
        return Ok(());
    };
    let track = &detail.tracks[i];
    spotify::playlist::remove_tracks_from_playlist(
        client,
        &playlist.id,
        &[track.uri.as_str()],
        Some(&detail.snapshot_id),
    )
    .await?;
    success!("'{}' removed from '{}'.", track.name, playlist.name);
    Ok(())
}

pub async fn reorder(client: &SpotifyClient) -> Result<()> {
    let Some(playlist) = pick_playlist(client).await? else {
        return Ok(());
    };
    let detail = spotify::playlist::get_playlist(client, &playlist.id, true, DETAIL_TRACKS).await?;
    if detail.tracks.len() < 2 {
        warning!("Nothing to reorder in '{}'.", playlist.name);
        return Ok(());
    }
    render::tracks(&detail.tracks);

    let count = detail.tracks.len();
    let Some(from) = prompt::choice("Move track number: ", count) else {
        return Ok(());
    };
    let Some(to) = prompt::number::<usize>(&format!("To position (1-{}): ", count)) else {
        return Ok(());
    };
    if to == 0 || to > count {
        warning!("Position out of range.");
        return Ok(());
    }

    let Some((range_start, insert_before)) = move_bounds(&detail.positions, from, to - 1) else {
        warning!("Could not locate the tracks in the playlist.");
        return Ok(());
    };
    spotify::playlist::reorder_playlist_tracks(
        client,
        &playlist.id,
        range_start,
        insert_before,
        1,
        Some(&detail.snapshot_id),
    )
    .await?;
    success!("Moved '{}' to position {}.", detail.tracks[from].name, to);
    Ok(())
}

pub async fn unfollow(client: &SpotifyClient) -> Result<()> {
    let Some(playlist) = pick_playlist(client).await? else {
        return Ok(());
    };
    if !prompt::confirm(&format!("Remove '{}' from your library?", playlist.name)) {
        return Ok(());
    }
    if spotify::playlist::unfollow_playlist(client, &playlist.id).await? {
        success!("'{}' unfollowed.", playlist.name);
    } else {
        warning!("Failed to unfollow playlist.");
    }
    Ok(())
}

/// `range_start` and `insert_before` that move the listed track `from` to the
/// place of the listed track `to`. Both are list indices; `positions` maps them
/// to playlist positions, which differ when unavailable items were left out.
/// Spotify counts `insert_before` on the playlist before the move.
fn move_bounds(positions: &[u32], from: usize, to: usize) -> Option<(u32, u32)> {
    let start = *positions.get(from)?;
    let target = *positions.get(to)?;
    let insert_before = if target > start { target + 1 } else { target };
    Some((start, insert_before))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_bounds_without_gaps() {
        let positions = [0, 1, 2, 3];
        assert_eq!(move_bounds(&positions, 0, 2), Some((0, 3)));
        assert_eq!(move_bounds(&positions, 3, 1), Some((3, 1)));
        assert_eq!(move_bounds(&positions, 2, 2), Some((2, 2)));
    }

    #[test]
    fn move_bounds_use_playlist_positions() {
        // item 1 of the playlist is unavailable and not listed
        let positions = [0, 2, 3];
        assert_eq!(move_bounds(&positions, 1, 0), Some((2, 0)));
        assert_eq!(move_bounds(&positions, 0, 2), Some((0, 4)));
    }

    #[test]
    fn move_bounds_out_of_range() {
        assert_eq!(move_bounds(&[0, 1], 2, 0), None);
        assert_eq!(move_bounds(&[0, 1], 0, 5), None);
    }
}
