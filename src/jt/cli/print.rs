use super::render::{render_changes, render_config, render_listing};
use super::styles::Styles;
use colored::Colorize;
use jt::api::{CmdMessage, MessageLevel};
use jt::commands::CmdResult;

pub(super) fn print_messages(styles: &Styles, messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", styles.ok(&message.content)),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", styles.err(&message.content)),
        }
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Changes first, then any listing, then messages.
pub(super) fn print_result(styles: &Styles, result: &CmdResult) {
    print_lines(&render_changes(styles, &result.changes));
    if let Some(listing) = &result.listing {
        print_lines(&render_listing(styles, listing));
    }
    print_messages(styles, &result.messages);
}

pub(super) fn print_config(styles: &Styles, result: &CmdResult, show_all: bool) {
    if show_all {
        if let Some(config) = &result.config {
            print_lines(&render_config(config));
        }
    }
    print_messages(styles, &result.messages);
}

/// Bare path on stdout, for `cd "$(jt tags cd ...)"`.
pub(super) fn print_path(styles: &Styles, result: &CmdResult) {
    if let Some(path) = &result.path {
        println!("{}", path.display());
    }
    print_messages(styles, &result.messages);
}
