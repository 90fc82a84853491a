// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::LocalSet;
use toast_queue::config::{self, Config};
use toast_queue::diagnostics::DiagnosticsCollector;
use toast_queue::error::{Error, Result};
use toast_queue::notifications::{
    Container, Content, ContentLocation, LocalScheduler, Manager, MessageRef,
};

/// Indeterminate progress bar drawn over a message.
struct ProgressOverlay;

/// Coloured strip placed around a message.
struct Strip(&'static str);

struct Flags {
    config: Option<PathBuf>,
    auto_dismiss: Option<f64>,
}

fn parse_flags() -> Result<Flags> {
    let mut args = pico_args::Arguments::from_env();
    let flags = Flags {
        config: args
            .opt_value_from_str("--config")
            .map_err(|e| Error::InvalidArgument(e.to_string()))?,
        auto_dismiss: args
            .opt_value_from_str("--auto-dismiss")
            .map_err(|e| Error::InvalidArgument(e.to_string()))?,
    };
    let rest = args.finish();
    if !rest.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "unexpected arguments: {rest:?}"
        )));
    }
    Ok(flags)
}

fn load_config(flags: &Flags) -> Result<Config> {
    let mut config = match &flags.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    if flags.auto_dismiss.is_some() {
        config.auto_dismiss_secs = flags.auto_dismiss;
    }
    config.validate()?;
    Ok(config)
}

fn describe_content(content: &Content) -> String {
    if let Some(text) = content.as_text() {
        text.to_string()
    } else if content.downcast_ref::<ProgressOverlay>().is_some() {
        "<progress>".to_string()
    } else if let Some(Strip(color)) = content.downcast_ref::<Strip>() {
        format!("<strip {color}>")
    } else {
        "<custom>".to_string()
    }
}

fn render(message: &MessageRef) -> String {
    let message = message.borrow();
    let content = message.content();
    let mut line = String::new();
    if let Some(badge) = content.badge().filter(|b| !b.is_empty()) {
        line.push_str(&format!("[{badge}] "));
    }
    if let Some(header) = content.header().filter(|h| !h.is_empty()) {
        line.push_str(&format!("{header}: "));
    }
    line.push_str(content.body().unwrap_or_default());
    if let Some(accent) = content.accent() {
        line.push_str(&format!(" (accent {accent})"));
    }
    if let Some(overlay) = content.overlay() {
        line.push_str(&format!(" {}", describe_content(overlay)));
    }
    for location in ContentLocation::ALL {
        if let Some(extra) = content.additional_content(location) {
            line.push_str(&format!(" {location:?}={}", describe_content(extra)));
        }
    }
    let labels: Vec<String> = content
        .buttons()
        .iter()
        .filter_map(|b| b.content().map(describe_content))
        .collect();
    if !labels.is_empty() {
        line.push_str(&format!(" {{{}}}", labels.join(" | ")));
    }
    if let Some(animation) = message.animation().filter(|a| a.enabled) {
        line.push_str(&format!(
            " ~in {:?}/out {:?}",
            animation.in_duration, animation.out_duration
        ));
    }
    line
}

fn press(message: &MessageRef, label: &str) {
    let button = message
        .buttons()
        .into_iter()
        .find(|b| b.content().and_then(Content::as_text) == Some(label));
    if let Some(button) = button {
        println!("  press \"{label}\"");
        button.activate();
    }
}

async fn run_scenarios(manager: Manager) {
    let error = manager
        .create_message()
        .accent("#F15B19")
        .background("#F15B19")
        .header("Lost connection to server")
        .body("Reconnecting...")
        .overlay(Content::custom(ProgressOverlay))
        .queue();

    let warning = manager
        .create_message()
        .accent("#E0A030")
        .background("#333")
        .badge("Warn")
        .header("Error")
        .body("Failed to retrieve data.")
        .with_button("Try again", |_| println!("  retrying..."))
        .dismiss()
        .with_button("Ignore", |_| println!("  ignored"))
        .queue();

    let info = manager
        .create_message()
        .accent("#1751C3")
        .background("#333")
        .badge("Info")
        .body("Update will be installed on next application restart.")
        .dismiss()
        .with_button("Update now", |_| println!("  updating"))
        .dismiss()
        .with_button("Release notes", |_| println!("  opening release notes"))
        .dismiss()
        .with_button("Later", |_| println!("  postponed"))
        .queue();

    manager
        .create_message()
        .accent("#1751C3")
        .animates(true)
        .animation_in_duration(Duration::from_millis(750))
        .animation_out_duration(Duration::from_secs(2))
        .background("#333")
        .badge("Info")
        .body("This message will be dismissed after 5 seconds.")
        .dismiss()
        .with_button("Update now", |_| {})
        .dismiss()
        .with_delay(Duration::from_secs(5))
        .queue();

    manager
        .create_message()
        .accent("#1751C3")
        .background("#333")
        .foreground("#333")
        .badge("Info")
        .header("Header")
        .body("This is the message!")
        .additional_content(ContentLocation::Top, Content::custom(Strip("red")))
        .additional_content(ContentLocation::Bottom, Content::custom(Strip("green")))
        .queue();

    tokio::time::sleep(Duration::from_secs(1)).await;
    press(&warning, "Try again");
    press(&warning, "Ignore");
    press(&info, "Later");

    println!("  connection restored");
    manager.dismiss(&error);

    tokio::time::sleep(Duration::from_millis(4500)).await;
    let left = manager.dismiss_all();
    println!("  cleared {left} remaining");
}

fn main() -> Result<()> {
    let flags = parse_flags()?;
    let config = load_config(&flags)?;

    let mut collector = DiagnosticsCollector::new(config.buffer_capacity());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let local = Rc::new(LocalSet::new());
    let scheduler = Rc::new(LocalScheduler::new(Rc::clone(&local)));

    let manager = Manager::with_config(&config, scheduler)?;
    manager.set_diagnostics(collector.handle());
    manager.on_queued(|m| println!("+ {}", render(m)));
    manager.on_dismissed(|m| println!("- {}", render(m)));

    let container = Container::new();
    container.attach(&manager)?;

    local.block_on(&runtime, run_scenarios(manager.clone()));

    println!("on screen: {}", container.items().len());
    collector.process_pending();
    match collector.export_json() {
        Ok(report) => println!("{report}"),
        Err(e) => eprintln!("diagnostics export failed: {e}"),
    }
    Ok(())
}
