use colored::Colorize;

use crate::{
    cli::{library, player, playlist, prompt, queue, report, search},
    error::Result,
    spotify::SpotifyClient,
    success, warning,
};

const MENU: &[(&str, &[&str])] = &[
    ("GENERAL", &["Exit", "View current user profile"]),
    (
        "LIBRARY",
        &[
            "View saved tracks",
            "Remove track from library",
            "Check if track is saved",
            "View saved albums",
            "Save album to library",
            "Remove album from library",
            "Check if album is saved",
        ],
    ),
    (
        "SEARCH",
        &[
            "Search tracks",
            "Search artists",
            "Search albums",
            "View artist's albums",
            "View artist's top tracks",
            "View album details",
        ],
    ),
    (
        "PLAYLISTS",
        &[
            "View your playlists",
            "View playlist details",
            "Create playlist",
            "Edit playlist details",
            "Add track to playlist",
            "Remove track from playlist",
            "Reorder playlist tracks",
            "Unfollow playlist",
        ],
    ),
    (
        "PLAYER",
        &[
            "View player state",
            "View currently playing",
            "View recently played",
            "Play/Pause (toggle)",
            "Next track",
            "Previous track",
            "Toggle shuffle",
            "Cycle repeat mode",
            "Set volume",
            "Seek to position",
            "View available devices",
            "Transfer playback to device",
        ],
    ),
    (
        "QUEUE",
        &["View queue", "Add track to queue", "Add artist track to queue"],
    ),
];

fn print_menu() {
    println!("\n{}", "spotcli - Spotify CLI".bold());
    let mut n = 1;
    for (section, entries) in MENU {
        println!("\n  {}", section.blue().bold());
        for entry in entries.iter() {
            println!("  {:>2}. {}", n, entry);
            n += 1;
        }
    }
    println!();
}

/// Runs the numbered menu until the user exits or stdin closes.
///
/// A failing action prints a warning and returns to the menu; an
/// authentication failure ends the process.
pub async fn run(client: &SpotifyClient) {
    loop {
        print_menu();
        let Some(input) = prompt::line("Choose an option: ") else {
            println!();
            return;
        };
        let Ok(choice) = input.parse::<u32>() else {
            warning!("Invalid input.");
            continue;
        };
        if choice == 1 {
            success!("Goodbye!");
            return;
        }

        if let Err(e) = dispatch(client, choice).await {
            report(e);
        }
    }
}

async fn dispatch(client: &SpotifyClient, choice: u32) -> Result<()> {
    match choice {
        2 => library::profile(client).await,
        3 => library::saved_tracks(client, 20).await,
        4 => library::remove_track(client).await,
        5 => library::check_track(client).await,
        6 => library::saved_albums(client).await,
        7 => library::save_album(client).await,
        8 => library::remove_album(client).await,
        9 => library::check_album(client).await,
        10 => search::search_and_save(client).await,
        11 => search::search_artists(client).await,
        12 => search::search_albums(client).await,
        13 => search::artist_albums(client).await,
        14 => search::artist_top_tracks(client).await,
        15 => search::album_details(client).await,
        16 => playlist::list(client).await,
        17 => playlist::details(client).await,
        18 => playlist::create(client).await,
        19 => playlist::edit(client).await,
        20 => playlist::add_track(client).await,
        21 => playlist::remove_track(client).await,
        22 => playlist::reorder(client).await,
        23 => playlist::unfollow(client).await,
        24 => player::state(client).await,
        25 => player::currently_playing(client).await,
        26 => player::recently_played(client).await,
        27 => player::toggle(client).await,
        28 => player::next(client).await,
        29 => player::previous(client).await,
        30 => player::shuffle(client).await,
        31 => player::repeat(client).await,
        32 => player::volume(client).await,
        33 => player::seek(client).await,
        34 => player::devices(client).await,
        35 => player::transfer(client).await,
        36 => queue::view(client).await,
        37 => queue::add_track(client).await,
        38 => queue::add_artist_track(client).await,
        _ => {
            warning!("Invalid option. Please try again.");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_has_thirty_eight_entries() {
        let total: usize = MENU.iter().map(|(_, entries)| entries.len()).sum();
        assert_eq!(total, 38);
    }
}
