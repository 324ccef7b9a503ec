//! listprompt - pick a line from a file, or an entry of the current directory.
//!
//! The chosen item is printed once the terminal has been restored.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use futures::{future, Stream, StreamExt};
use listprompt::{Control, Key, KeyOutcome, Options, Prompt, StreamList};
use ratatui::text::Line;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::{LinesStream, ReadDirStream};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    // Parse command-line arguments
    let matches = Command::new("listprompt")
        .version(listprompt::VERSION)
        .about("Interactively pick one item from a fuzzy-searchable list")
        .long_about(
            "listprompt shows the lines of FILE, or the entries of the current directory, \
             in a scrollable list. Type / to search, Enter to print the selected item.",
        )
        .arg(
            Arg::new("file")
                .help("File whose lines are listed")
                .value_parser(clap::value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("lines")
                .short('n')
                .long("lines")
                .help("Number of visible rows")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("search")
                .short('s')
                .long("search")
                .help("Start with the search input active")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Render without colors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-vim")
                .long("no-vim")
                .help("Disable h/j/k/l navigation")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let mut options = base_options()?;
    if let Some(lines) = matches.get_one::<usize>("lines") {
        options.line_size = *lines;
    }
    options.start_in_search |= matches.get_flag("search");
    options.disable_color |= matches.get_flag("no-color");
    options.vim_keys &= !matches.get_flag("no-vim");

    let file = matches.get_one::<PathBuf>("file");
    let label = match file {
        Some(path) => format!("Lines of {}", path.display()),
        None => "Entries".to_string(),
    };

    let list = match file {
        Some(path) => StreamList::new(file_lines(path).await?, options.line_size)?,
        None => StreamList::new(directory_entries(Path::new(".")).await?, options.line_size)?,
    };

    let mut prompt = Prompt::new(label, options, list)?
        .with_key_handler(|key, _, control: &mut Control| match key {
            Key::Char('q') => {
                control.stop();
                Ok(KeyOutcome::Handled)
            }
            _ => Ok(KeyOutcome::Ignored),
        })
        .with_info_renderer(|item: &String| describe(item));
    prompt.add_control("q", "quit");

    prompt.run().await?;

    Ok(())
}

#[cfg(feature = "config")]
fn base_options() -> Result<Options> {
    Ok(Options::load_default()?)
}

#[cfg(not(feature = "config"))]
fn base_options() -> Result<Options> {
    Ok(Options::default())
}

async fn file_lines(path: &Path) -> Result<impl Stream<Item = String> + Send + 'static> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("cannot open {}", path.display()))?;
    let lines = LinesStream::new(BufReader::new(file).lines());
    Ok(lines.filter_map(|line| future::ready(line.ok())))
}

async fn directory_entries(dir: &Path) -> Result<impl Stream<Item = String> + Send + 'static> {
    let entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("cannot read {}", dir.display()))?;
    Ok(ReadDirStream::new(entries).filter_map(|entry| {
        future::ready(
            entry
                .ok()
                .map(|entry| entry.file_name().to_string_lossy().into_owned()),
        )
    }))
}

/// Kind and size of the path an item names, when it names one.
fn describe(item: &str) -> Vec<Line<'static>> {
    match std::fs::metadata(item) {
        Ok(meta) if meta.is_dir() => vec![Line::from("directory")],
        Ok(meta) => vec![Line::from(format!("file, {} bytes", meta.len()))],
        Err(_) => vec![Line::from(format!("{} characters", item.chars().count()))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!listprompt::VERSION.is_empty());
    }

    #[test]
    fn describe_falls_back_to_length() {
        let lines = describe("no such entry ü");
        assert_eq!(lines, vec![Line::from("15 characters")]);
    }

    #[tokio::test]
    async fn file_lines_streams_every_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.txt");
        std::fs::write(&path, "alpha\nbeta\ngamma\n").unwrap();

        let lines: Vec<String> = file_lines(&path).await.unwrap().collect().await;
        assert_eq!(lines, vec!["alpha", "beta", "gamma"]);
    }

    #[tokio::test]
    async fn directory_entries_lists_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let mut names: Vec<String> = directory_entries(dir.path()).await.unwrap().collect().await;
        names.sort();
        assert_eq!(names, vec!["a.txt", "sub"]);
    }
}
