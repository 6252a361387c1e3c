use colored::Colorize;
use tabled::Table;

use crate::{
    types::{
        Album, AlbumDetail, AlbumTableRow, Artist, ArtistTableRow, Device, DeviceTableRow,
        HistoryTableRow, PlayHistory, PlayerState, Playlist, PlaylistDetail, PlaylistTableRow,
        Queue, Track, TrackTableRow, UserProfile,
    },
    utils::{format_duration, format_played_at},
};

fn yes_no(b: bool) -> String {
    if b { "yes".to_string() } else { "no".to_string() }
}

pub fn tracks(tracks: &[Track]) {
    let rows: Vec<TrackTableRow> = tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            index: i + 1,
            name: t.name.clone(),
            artist: t.artist.clone(),
            album: t.album.clone(),
            duration: format_duration(t.duration_ms),
            id: t.id.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub fn artists(artists: &[Artist]) {
    let rows: Vec<ArtistTableRow> = artists
        .iter()
        .enumerate()
        .map(|(i, a)| ArtistTableRow {
            index: i + 1,
            name: a.name.clone(),
            followers: a.followers,
            popularity: format!("{}/100", a.popularity),
            genres: a.genres.clone(),
            id: a.id.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub fn albums(albums: &[Album]) {
    let rows: Vec<AlbumTableRow> = albums
        .iter()
        .enumerate()
        .map(|(i, a)| AlbumTableRow {
            index: i + 1,
            name: a.name.clone(),
            artist: a.artist.clone(),
            released: a.release_date.clone(),
            id: a.id.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub fn playlists(playlists: &[Playlist]) {
    let rows: Vec<PlaylistTableRow> = playlists
        .iter()
        .enumerate()
        .map(|(i, p)| PlaylistTableRow {
            index: i + 1,
            name: p.name.clone(),
            tracks: p.track_count,
            public: yes_no(p.is_public),
            id: p.id.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub fn devices(devices: &[Device]) {
    let rows: Vec<DeviceTableRow> = devices
        .iter()
        .enumerate()
        .map(|(i, d)| DeviceTableRow {
            index: i + 1,
            name: d.name.clone(),
            device_type: d.device_type.clone(),
            volume: format!("{}%", d.volume_percent),
            active: yes_no(d.is_active),
            id: d.id.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub fn history(history: &[PlayHistory]) {
    let rows: Vec<HistoryTableRow> = history
        .iter()
        .enumerate()
        .map(|(i, h)| HistoryTableRow {
            index: i + 1,
            played_at: format_played_at(&h.played_at),
            name: h.track.name.clone(),
            artist: h.track.artist.clone(),
            context: h.context_type.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub fn album_detail(detail: &AlbumDetail) {
    let album = &detail.album;
    println!("{} by {}", album.name.bold(), album.artist);
    println!("Released: {}  Tracks: {}", album.release_date, album.total_tracks);
    println!("URI: {}\n", album.uri);
    tracks(&detail.tracks);
}

pub fn playlist_detail(detail: &PlaylistDetail) {
    println!("{}", detail.name.bold());
    if !detail.description.is_empty() {
        println!("{}", detail.description);
    }
    println!(
        "Owner: {} ({})  Tracks: {}  Public: {}  Collaborative: {}",
        detail.owner_name,
        detail.owner_id,
        detail.total_tracks,
        yes_no(detail.is_public),
        yes_no(detail.is_collaborative)
    );
    println!("URI: {}", detail.uri);
    if !detail.tracks.is_empty() {
        println!();
        tracks(&detail.tracks);
    }
}

pub fn player_state(state: &PlayerState) {
    let status = if state.is_playing { "Playing".green() } else { "Paused".yellow() };
    println!("{}: {} - {}", status, state.track_name.bold(), state.artist_name);
    if !state.album_name.is_empty() {
        println!("Album: {}", state.album_name);
    }
    println!(
        "Progress: {} / {}",
        format_duration(state.progress_ms),
        format_duration(state.duration_ms)
    );
    if !state.device.name.is_empty() {
        println!(
            "Device: {} ({}, volume {}%)",
            state.device.name, state.device.device_type, state.device.volume_percent
        );
    }
    println!(
        "Shuffle: {}  Repeat: {}",
        if state.shuffle_state { "on" } else { "off" },
        state.repeat_state
    );
    if !state.context_type.is_empty() {
        println!("Context: {} {}", state.context_type, state.context_uri);
    }
}

pub fn profile(profile: &UserProfile) {
    let name = if profile.display_name.is_empty() {
        &profile.id
    } else {
        &profile.display_name
    };
    println!("{}", name.bold());
    println!("Id: {}", profile.id);
    if !profile.email.is_empty() {
        println!("Email: {}", profile.email);
    }
    if !profile.country.is_empty() {
        println!("Country: {}", profile.country);
    }
    if !profile.product.is_empty() {
        println!("Plan: {}", profile.product);
    }
    println!("Followers: {}", profile.followers);
    if !profile.profile_url.is_empty() {
        println!("Profile: {}", profile.profile_url);
    }
}

pub fn queue(queue: &Queue) {
    match &queue.currently_playing {
        Some(t) => println!("Now playing: {} - {}\n", t.name.bold(), t.artist),
        None => println!("Nothing playing.\n"),
    }
    if queue.queue.is_empty() {
        println!("Queue is empty.");
    } else {
        tracks(&queue.queue);
    }
}
