use std::path::PathBuf;

use time::macros::format_description;

use clipwatch::feed::FeedStore;
use clipwatch::live::LiveEventChannel;
use clipwatch::model::{Clip, ClipId};
use clipwatch::remote::DeleteAck;

use super::*;

pub(super) fn handle_clips_command(client: &RemoteClient, json: bool) -> Result<()> {
    let records = client.list_clips()?;
    let mut feed = FeedStore::new();
    let report = feed.ingest_snapshot(records);
    for err in &report.rejected {
        eprintln!("skipped: {}", err);
    }

    let view = feed.view();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("serialize clips json")?
        );
        return Ok(());
    }

    if view.is_empty() {
        println!("No clips");
        return Ok(());
    }
    for group in &view.groups {
        println!("{} ({})", group.date, group.clips.len());
        for clip in &group.clips {
            println!("  {}", clip_line(clip));
        }
    }
    Ok(())
}

pub(super) fn handle_watch_command(client: &RemoteClient, json: bool) -> Result<()> {
    let channel = LiveEventChannel::connect(client)?;
    eprintln!("Watching for new clips (Ctrl-C to stop)");
    for raw in channel.iter() {
        match Clip::try_from(raw) {
            Ok(clip) if json => println!(
                "{}",
                serde_json::to_string(&clip).context("serialize clip json")?
            ),
            Ok(clip) => println!("{} {}", clip.timestamp, clip_line(&clip)),
            Err(err) => eprintln!("skipped: {}", err),
        }
    }
    if let Some(err) = channel.close_reason() {
        return Err(err).context("live clip stream closed");
    }
    eprintln!("Live clip stream closed");
    Ok(())
}

pub(super) fn handle_delete_command(client: &RemoteClient, clip_id: &str) -> Result<()> {
    let id = ClipId::new(clip_id.trim());
    match client.delete_clip(&id)? {
        DeleteAck::Deleted => println!("Deleted {}", id),
        DeleteAck::AlreadyAbsent => println!("{} was already deleted", id),
    }
    Ok(())
}

pub(super) fn handle_download_command(
    client: &RemoteClient,
    clip_id: &str,
    out: Option<PathBuf>,
) -> Result<()> {
    let id = ClipId::new(clip_id.trim());
    let dest = out.unwrap_or_else(|| PathBuf::from(format!("{}.mp4", id.as_str().replace('/', "_"))));
    let bytes = client
        .download_clip(&id, &dest)
        .with_context(|| format!("download {}", id))?;
    println!("Downloaded {} ({} bytes) to {}", id, bytes, dest.display());
    Ok(())
}

fn clip_line(clip: &Clip) -> String {
    let time = clip
        .timestamp
        .datetime()
        .format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| clip.timestamp.to_rfc3339());
    if clip.video_ref.is_empty() {
        format!("{} {}", time, clip.id)
    } else {
        format!("{} {} ({})", time, clip.id, clip.video_ref)
    }
}
