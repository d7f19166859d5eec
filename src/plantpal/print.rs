use chrono::{Local, NaiveDate};
use colored::*;
use plantpal::api::{CmdMessage, MessageLevel};
use plantpal::model::{Photo, Plant};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 5;
const TIME_WIDTH: usize = 16;
const COVER_MARKER: &str = "★";

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_plants(plants: &[Plant]) {
    for plant in plants {
        println!("{}", list_line(plant));
    }
}

fn list_line(plant: &Plant) -> String {
    let id = format!("{:>width$}. ", plant.id, width = ID_WIDTH - 2);
    let acquired = plant
        .acquired_on()
        .map(|date| acquired_ago(date, Local::now().date_naive()))
        .unwrap_or_default();

    let label = if plant.scientific_name.is_empty() {
        plant.name.clone()
    } else {
        format!("{} ({})", plant.name, plant.scientific_name)
    };
    let available = LINE_WIDTH.saturating_sub(ID_WIDTH + TIME_WIDTH);
    let label = truncate_to_width(&label, available);
    let padding = available.saturating_sub(label.width());

    format!(
        "{}{}{}{}",
        id.yellow(),
        label,
        " ".repeat(padding),
        format!("{:>width$}", acquired, width = TIME_WIDTH).dimmed()
    )
}

pub fn print_plant_detail(plant: &Plant) {
    println!("{} {}", format!("{}.", plant.id).yellow(), plant.name.bold());
    if !plant.scientific_name.is_empty() {
        println!("   {}", plant.scientific_name.italic());
    }
    println!("--------------------------------");
    print_field("Price", &plant.price);
    print_field("Where bought", &plant.where_bought);
    let acquired = match plant.acquired_on() {
        Some(date) => format!(
            "{} ({})",
            plant.date_acquired,
            acquired_ago(date, Local::now().date_naive())
        ),
        None => plant.date_acquired.clone(),
    };
    print_field("Acquired", &acquired);
    if !plant.notes.is_empty() {
        println!();
        println!("{}", plant.notes);
    }

    println!();
    if plant.photos.is_empty() {
        println!("{}", "No photos yet.".dimmed());
        return;
    }
    println!("Photos:");
    for (i, photo) in plant.photos.iter().enumerate() {
        let marker = if i == plant.thumbnail_index {
            COVER_MARKER
        } else {
            " "
        };
        println!(
            "  {} {:>2}. {}  {}",
            marker.yellow(),
            i + 1,
            describe_photo(photo),
            photo.date_taken.dimmed()
        );
    }
}

fn print_field(label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    println!("{:<14}{}", format!("{}:", label).dimmed(), value);
}

/// Inline photos are summarized rather than printed.
fn describe_photo(photo: &Photo) -> String {
    if !photo.is_inline() {
        return photo.url.clone();
    }
    let mime = photo
        .url
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .unwrap_or("image");
    // base64 expands by 4/3
    let kb = photo.url.len() * 3 / 4 / 1024;
    format!("uploaded {} (~{} KB)", mime, kb)
}

fn acquired_ago(date: NaiveDate, today: NaiveDate) -> String {
    let days = today.signed_duration_since(date);
    if days.num_days() <= 0 {
        return "today".to_string();
    }
    let formatter = timeago::Formatter::new();
    formatter.convert(days.to_std().unwrap_or_default())
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
