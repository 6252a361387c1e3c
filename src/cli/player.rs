use crate::{
    cli::{prompt, render},
    error::Result,
    info,
    spotify::{self, SpotifyClient},
    success,
    utils::format_duration,
    warning,
};

/// Player state for `--player` and the menu.
pub async fn state(client: &SpotifyClient) -> Result<()> {
    match spotify::player::get_player_state(client).await? {
        Some(state) => render::player_state(&state),
        None => warning!("Nothing is playing right now."),
    }
    Ok(())
}

pub async fn currently_playing(client: &SpotifyClient) -> Result<()> {
    match spotify::player::get_currently_playing(client).await? {
        Some(state) if !state.track_name.is_empty() => {
            info!(
                "{} - {} [{} / {}]",
                state.track_name,
                state.artist_name,
                format_duration(state.progress_ms),
                format_duration(state.duration_ms)
            );
        }
        _ => warning!("Nothing is playing right now."),
    }
    Ok(())
}

pub async fn recently_played(client: &SpotifyClient) -> Result<()> {
    let history = spotify::user::get_recently_played(client, 20).await?;
    if history.is_empty() {
        warning!("No recently played tracks.");
        return Ok(());
    }
    render::history(&history);
    Ok(())
}

pub async fn toggle(client: &SpotifyClient) -> Result<()> {
    if spotify::player::toggle_playback(client).await? {
        success!("Playback resumed.");
    } else {
        success!("Playback paused.");
    }
    Ok(())
}

pub async fn next(client: &SpotifyClient) -> Result<()> {
    if spotify::player::skip_next(client, None).await? {
        success!("Skipped to next track.");
    } else {
        warning!("Failed to skip track.");
    }
    Ok(())
}

pub async fn previous(client: &SpotifyClient) -> Result<()> {
    if spotify::player::skip_previous(client, None).await? {
        success!("Back to previous track.");
    } else {
        warning!("Failed to go back.");
    }
    Ok(())
}

pub async fn shuffle(client: &SpotifyClient) -> Result<()> {
    let Some(state) = spotify::player::get_player_state(client).await? else {
        warning!("No active playback.");
        return Ok(());
    };
    let enable = !state.shuffle_state;
    if spotify::player::set_shuffle(client, None, enable).await? {
        success!("Shuffle {}.", if enable { "on" } else { "off" });
    } else {
        warning!("Failed to change shuffle.");
    }
    Ok(())
}

pub async fn repeat(client: &SpotifyClient) -> Result<()> {
    let mode = spotify::player::cycle_repeat(client, None).await?;
    success!("Repeat mode: {}", mode.as_str());
    Ok(())
}

pub async fn volume(client: &SpotifyClient) -> Result<()> {
    let Some(percent) = prompt::number::<u32>("\nVolume (0-100): ") else {
        return Ok(());
    };
    if spotify::player::set_volume(client, None, percent).await? {
        success!("Volume set to {}%.", percent);
    } else {
        warning!("Failed to set volume.");
    }
    Ok(())
}

pub async fn seek(client: &SpotifyClient) -> Result<()> {
    let Some(state) = spotify::player::get_player_state(client).await? else {
        warning!("No active playback.");
        return Ok(());
    };
    info!(
        "{} at {} of {}",
        state.track_name,
        format_duration(state.progress_ms),
        format_duration(state.duration_ms)
    );

    let Some(seconds) = prompt::number::<u64>("Enter new position in seconds: ") else {
        return Ok(());
    };
    let position_ms = seconds.saturating_mul(1000);
    if position_ms > state.duration_ms {
        warning!("Position out of range.");
        return Ok(());
    }
    if spotify::player::seek_to_position(client, None, position_ms).await? {
        success!("Seeked to {}.", format_duration(position_ms));
    } else {
        warning!("Failed to seek.");
    }
    Ok(())
}

pub async fn devices(client: &SpotifyClient) -> Result<()> {
    let devices = spotify::player::get_available_devices(client).await?;
    if devices.is_empty() {
        warning!("No devices found. Open Spotify on one of your devices.");
        return Ok(());
    }
    render::devices(&devices);
    Ok(())
}

pub async fn transfer(client: &SpotifyClient) -> Result<()> {
    let devices = spotify::player::get_available_devices(client).await?;
    if devices.is_empty() {
        warning!("No devices found. Open Spotify on one of your devices.");
        return Ok(());
    }
    render::devices(&devices);

    let Some(i) = prompt::choice("Enter device number (or 0 to cancel): ", devices.len()) else {
        return Ok(());
    };
    let device = &devices[i];
    let play = prompt::confirm("Start playing there?");
    if spotify::player::transfer_playback(client, &device.id, play).await? {
        success!("Playback transferred to {}.", device.name);
    } else {
        warning!("Failed to transfer playback.");
    }
    Ok(())
}
