//! Terminal presentation of alerts.
//!
//! Renders a displayed [`Alert`] as numbered choices and reads the user's
//! pick from a line-based input.

use anyhow::{Result, bail};
use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    alerts::{ActionType, Alert, AlertAction},
    config::Labels,
};

/// Renders `alert` as text, actions numbered from 1 in display order.
pub fn render(alert: &Alert, labels: &Labels) -> String {
    let mut text = format!("[{:?}] {}\n", alert.kind, alert.title);
    if let Some(description) = &alert.description {
        text.push_str(description);
        text.push('\n');
    }
    for (index, action) in alert.actions().iter().enumerate() {
        text.push_str(&format!("  {}) {}\n", index + 1, label(action, labels)));
    }
    text
}

/// Label shown for `action`.
fn label(action: &AlertAction, labels: &Labels) -> String {
    match (&action.meta.content, action.kind()) {
        (Some(content), _) => content.clone(),
        (None, ActionType::Cancel) => labels.cancel.clone(),
        (None, ActionType::Link) => action.meta.to.clone().unwrap_or_default(),
        (None, _) => labels.confirm.clone(),
    }
}

/// Maps a line typed by the user to the id of the chosen action.
///
/// Accepts a 1-based index or an action label, case-insensitively.
pub fn parse_choice<'a>(alert: &'a Alert, labels: &Labels, input: &str) -> Option<&'a str> {
    let input = input.trim();
    if let Ok(index) = input.parse::<usize>() {
        return alert
            .actions()
            .get(index.checked_sub(1)?)
            .map(AlertAction::id);
    }
    alert
        .actions()
        .iter()
        .find(|action| label(action, labels).eq_ignore_ascii_case(input))
        .map(AlertAction::id)
}

/// Displays `alert` on `output` and reads choices from `input` until one is valid.
///
/// Returns the id of the chosen action.
///
/// # Errors
///
/// Fails if the alert has no action, on I/O errors, or if the input ends
/// before a valid choice.
pub async fn prompt<R, W>(alert: &Alert, labels: &Labels, input: &mut R, output: &mut W) -> Result<String>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if alert.actions().is_empty() {
        bail!("alert {} has no action to choose from", alert.id);
    }

    output.write_all(render(alert, labels).as_bytes()).await?;
    let mut line = String::new();
    loop {
        output.write_all(b"> ").await?;
        output.flush().await?;

        line.clear();
        if input.read_line(&mut line).await? == 0 {
            bail!("input closed before a choice was made");
        }
        match parse_choice(alert, labels, &line) {
            Some(action_id) => return Ok(action_id.to_string()),
            None => {
                debug!("invalid choice {:?}", line.trim());
                output.write_all(b"invalid choice\n").await?;
            }
        }
    }
}
