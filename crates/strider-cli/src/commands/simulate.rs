//! Simulate command: drive the locomotion tick from a key script

use super::{check_format, load};
use anyhow::{Context, Result};
use serde::Serialize;
use strider_locomotion::{LocomotionState, MotionState, MoveOutcome};
use strider_player::StriderConfig;
use strider_runtime::{key_for_char, InputState, KeyCode};

pub struct SimulateArgs<'a> {
    pub config: &'a StriderConfig,
    pub scene: String,
    pub script: String,
    pub dt: f64,
    pub format: String,
}

/// Keys held for a number of frames
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub keys: Vec<KeyCode>,
    pub frames: u32,
}

/// Parse `"w:30,wd:20,:10"` into segments; an empty key list means idle.
pub fn parse_script(script: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    for part in script.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (keys, frames) = part
            .split_once(':')
            .with_context(|| format!("Segment '{}' is not keys:frames", part))?;
        let frames: u32 = frames
            .trim()
            .parse()
            .with_context(|| format!("Invalid frame count in segment '{}'", part))?;
        let keys = keys
            .trim()
            .chars()
            .map(|c| key_for_char(c).with_context(|| format!("Unknown key '{}' in segment '{}'", c, part)))
            .collect::<Result<Vec<_>>>()?;
        segments.push(Segment { keys, frames });
    }
    if segments.is_empty() {
        anyhow::bail!("Script has no segments");
    }
    Ok(segments)
}

#[derive(Debug, Default, Serialize)]
struct SegmentReport {
    frames: u32,
    end: [f32; 3],
    walking: bool,
    blocked_steps: u32,
    ungrounded_frames: u32,
}

pub fn run(args: SimulateArgs<'_>) -> Result<()> {
    check_format(&args.format)?;
    if args.dt.is_nan() || args.dt <= 0.0 {
        anyhow::bail!("--dt must be positive, got {}", args.dt);
    }
    let segments = parse_script(&args.script)?;
    let (resolved, graph) = load(args.config, &args.scene)?;

    let mut state = LocomotionState::new(args.config.locomotion.clone());
    state.load_world(graph, resolved.ground_y_offset);
    let spawn = state
        .spawn()
        .with_context(|| format!("No spawn point in scene '{}'", resolved.name))?;
    log::info!("Spawned at {:?} in '{}'", spawn.position, resolved.name);

    let mut input = InputState::new();
    let mut reports = Vec::with_capacity(segments.len());

    for segment in &segments {
        input.release_all();
        for &key in &segment.keys {
            input.process_key_down(key);
        }

        let mut report = SegmentReport {
            frames: segment.frames,
            ..SegmentReport::default()
        };
        for _ in 0..segment.frames {
            let tick = state.tick(&input, args.dt);
            if tick.step == Some(MoveOutcome::Blocked) {
                report.blocked_steps += 1;
            }
            if !tick.grounded {
                report.ungrounded_frames += 1;
            }
            input.end_frame();
        }
        report.end = state.character.position.to_array();
        report.walking = state.character.motion == MotionState::Walking;
        reports.push(report);
    }

    if args.format == "json" {
        let out = serde_json::json!({
            "scene": resolved.name,
            "spawn": spawn.position.to_array(),
            "segments": reports,
            "final": state.character.position.to_array(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let s = spawn.position;
    println!("Scene '{}', spawn ({:.3}, {:.3}, {:.3})", resolved.name, s.x, s.y, s.z);
    for (i, r) in reports.iter().enumerate() {
        println!(
            "  #{:<2} {:>4} frames -> ({:.3}, {:.3}, {:.3}) {}{}{}",
            i,
            r.frames,
            r.end[0],
            r.end[1],
            r.end[2],
            if r.walking { "walking" } else { "idle" },
            if r.blocked_steps > 0 {
                format!(", {} blocked", r.blocked_steps)
            } else {
                String::new()
            },
            if r.ungrounded_frames > 0 {
                format!(", {} off ground", r.ungrounded_frames)
            } else {
                String::new()
            }
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_idle_segments() {
        let segments = parse_script("w:30, WD:20,:10").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment {
                    keys: vec![KeyCode::KeyW],
                    frames: 30
                },
                Segment {
                    keys: vec![KeyCode::KeyW, KeyCode::KeyD],
                    frames: 20
                },
                Segment {
                    keys: vec![],
                    frames: 10
                },
            ]
        );
    }

    #[test]
    fn rejects_bad_segments() {
        assert!(parse_script("").is_err());
        assert!(parse_script("w30").is_err());
        assert!(parse_script("x:5").is_err());
        assert!(parse_script("w:-1").is_err());
    }
}
