// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, Weekday};
use timesync_domain::Event;

const fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "月",
        Weekday::Tuesday => "火",
        Weekday::Wednesday => "水",
        Weekday::Thursday => "木",
        Weekday::Friday => "金",
        Weekday::Saturday => "土",
        Weekday::Sunday => "日",
    }
}

/// Formats a date as `M月d日 (曜)`.
#[must_use]
pub fn format_announcement_date(date: Date) -> String {
    format!(
        "{}月{}日 ({})",
        u8::from(date.month()),
        date.day(),
        weekday_label(date.weekday())
    )
}

/// Builds the plain-text announcement for a finalized event.
///
/// Returns `None` unless the event has a finalized date. `participant_link`
/// must not carry the organizer token.
#[must_use]
pub fn format_finalized_announcement(event: &Event, participant_link: &str) -> Option<String> {
    let finalized = event.finalized_date.as_ref()?;
    let info = &event.finalized_info;

    let mut text: String =
        format!("【{}】\n開催日時がきまりました！\n\n", event.title);
    text.push_str(&format!(
        "📅 {}\n",
        format_announcement_date(finalized.date)
    ));
    if !finalized.time_range.is_empty() {
        text.push_str(&format!("⏰ {}\n", finalized.time_range));
    }

    if let Some(place) = &info.place {
        text.push_str(&format!("📍 会場: {place}\n"));
        if let Some(url) = &info.url {
            text.push_str(&format!("   {url}\n"));
        }
    }

    if let Some(meeting_place) = &info.meeting_place {
        text.push_str(&format!("🚩 集合: {meeting_place}\n"));
    }

    if let Some(notes) = &info.notes {
        text.push_str(&format!("\n📝 案内:\n{notes}\n"));
    }

    text.push_str(&format!(
        "\n🔗 {participant_link}\n\n回答ありがとうございました！"
    ));
    Some(text)
}
