use std::iter;

use photobingo_core::{CellCount, Tier, TierStatus, WinEngine};
use serde::{Deserialize, Serialize};

use crate::*;

pub const REPORT_HEADERS: [&str; 6] = [
    "User ID",
    "Name",
    "Role",
    "Game Started",
    "Images Uploaded",
    "Bingo Status",
];

/// Progress of one user, classified with the same engine players see.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub user_id: String,
    pub name: String,
    pub role: Role,
    /// `None` when the user never started a game.
    pub status: Option<TierStatus>,
    pub images_uploaded: CellCount,
}

impl ReportRow {
    pub fn game_started(&self) -> bool {
        self.status.is_some()
    }

    pub fn status_label(&self) -> String {
        self.status
            .map_or_else(|| Tier::Playing.name().to_string(), |status| status.to_string())
    }
}

/// One row per user, in user order.
pub fn build_report(
    engine: &WinEngine,
    users: &[UserRecord],
    states: &GameStates,
) -> Result<Vec<ReportRow>> {
    users
        .iter()
        .map(|user| {
            let (status, images_uploaded) = match states.get(&user.id) {
                Some(record) => {
                    let occupied = record.occupied(engine.config())?;
                    (Some(engine.status(&occupied)), occupied.len())
                }
                None => (None, 0),
            };
            Ok(ReportRow {
                user_id: user.id.clone(),
                name: user.name.clone(),
                role: user.role,
                status,
                images_uploaded,
            })
        })
        .collect()
}

/// Renders rows as CSV with a header line. Id and name are always quoted so ids
/// with leading zeros survive spreadsheet imports.
pub fn render_csv(rows: &[ReportRow]) -> String {
    let lines = rows.iter().map(|row| {
        format!(
            "{},{},{},{},{},{}",
            quoted(&row.user_id),
            quoted(&row.name),
            row.role,
            if row.game_started() { "Yes" } else { "No" },
            row.images_uploaded,
            escaped(&row.status_label()),
        )
    });
    iter::once(REPORT_HEADERS.join(","))
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n")
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn escaped(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        quoted(field)
    } else {
        field.to_string()
    }
}
