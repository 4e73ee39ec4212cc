//! Turns a finished probe into a result record.

use crate::store::TrialStore;
use crate::tracker::LiveStimuli;
use tracing::{debug, warn};
use vwm_core::circular::{hue_from_hsl, signed_diff_360};
use vwm_core::{
    ExportedStimulus, ProbeIndex, ProbeResult, ResponseKind, Side, Stimulus, TrialSpec,
};

/// Scores probe `probe` of `spec` from the engine's live objects at completion.
///
/// The target comes from the unmasked sample item in `store`. Returns
/// `None` when neither the sample nor the live screen holds a bar or a
/// circle for this probe.
pub fn score_probe<L: LiveStimuli + ?Sized>(
    spec: &TrialSpec,
    probe: ProbeIndex,
    live: &L,
    store: &TrialStore,
    screen_width: f64,
) -> Option<ProbeResult> {
    let target = probe.target();
    let originals: Vec<Stimulus> = store
        .display_stimuli(&spec.key)
        .into_iter()
        .filter(|s| s.test_status() == target)
        .collect();
    let orig_line = originals.iter().find_map(Stimulus::as_line);
    let orig_circle = originals.iter().find_map(Stimulus::as_circle);

    let live_line = live.line();
    let live_circle = live.circle();

    let response_kind = if live_line.is_some() || orig_line.is_some() {
        ResponseKind::Orientation
    } else if live_circle.is_some() || orig_circle.is_some() {
        ResponseKind::Color
    } else {
        warn!(key = %spec.key, %probe, "nothing to score on probe");
        return None;
    };

    let mut result = ProbeResult::blank(spec, probe, response_kind);
    result.stimulus_response = live
        .snapshot()
        .into_iter()
        .map(ExportedStimulus::from)
        .collect();
    result.side = live_circle.map(|c| {
        if c.start_x < screen_width / 2.0 {
            Side::Left
        } else {
            Side::Right
        }
    });

    match response_kind {
        ResponseKind::Orientation => {
            let target = orig_line.map(|l| l.angle_deg());
            let selected = live_line.map(|l| l.angle_deg());
            result.target_orientation_deg = target;
            result.selected_orientation_deg = selected;
            result.signed_error_deg = target.zip(selected).map(|(t, s)| signed_diff_360(s, t));
        }
        ResponseKind::Color => {
            let target = hue_from_hsl(orig_circle.map(|c| c.fill_color.as_str()));
            let selected = hue_from_hsl(live_circle.map(|c| c.fill_color.as_str()));
            if selected.is_none() {
                debug!(key = %spec.key, %probe, "no hue selected on colour probe");
            }
            result.target_color_deg = target;
            result.selected_color_deg = selected;
            result.signed_error_deg = target.zip(selected).map(|(t, s)| signed_diff_360(s, t));
            result.wheel_offset_deg = live.wheel().map(|w| w.offset);
        }
    }

    debug!(
        key = %spec.key,
        %probe,
        kind = ?response_kind,
        error = ?result.signed_error_deg,
        "scored probe"
    );
    Some(result)
}
