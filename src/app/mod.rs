//! Terminal front end.
//!
//! A line-oriented menu over any reader/writer pair. It only issues
//! commands to [`WatchService`] and renders what comes back; failures of
//! individual commands are printed and the loop keeps running.

mod cursor;
mod menu;

pub use cursor::ListCursor;
pub use menu::{ListCommand, MenuAction};

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::watch::{
    AddResult, Article, ArticleSource, Document, Fetch, WatchService, DEFAULT_ARTICLE_TITLE,
};

/// Maximum characters of a title or content line shown per row.
const DISPLAY_WIDTH: usize = 76;

/// Interactive session over `input` and `output`.
pub struct App<R, W, L, A, F>
where
    R: BufRead,
    W: Write,
    L: Document,
    A: Document,
    F: Fetch,
{
    service: WatchService<L, A, F>,
    input: R,
    output: W,
    page_size: usize,
}

impl<R, W, L, A, F> App<R, W, L, A, F>
where
    R: BufRead,
    W: Write,
    L: Document,
    A: Document,
    F: Fetch,
{
    /// Create a session.
    pub fn new(service: WatchService<L, A, F>, input: R, output: W, page_size: usize) -> Self {
        Self {
            service,
            input,
            output,
            page_size,
        }
    }

    /// Consume the session and return the output writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the main menu until the user exits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.show_main_menu()?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            match MenuAction::parse(&line) {
                MenuAction::AddLink => self.add_link()?,
                MenuAction::CheckUpdates => self.check_updates().await?,
                MenuAction::ViewLinks => self.view_links().await?,
                MenuAction::ViewSaved => self.view_saved()?,
                MenuAction::Quit => {
                    writeln!(self.output, "Goodbye.")?;
                    return Ok(());
                }
                MenuAction::Invalid(input) if input.is_empty() => {}
                MenuAction::Invalid(input) => {
                    writeln!(self.output, "Invalid selection: {}", input)?;
                }
            }
        }
    }

    fn show_main_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "=== Link Watch ===")?;
        for action in MenuAction::ALL {
            writeln!(self.output, "  [{}] {}", action.key(), action.label())?;
        }
        self.prompt("Select: ")
    }

    fn add_link(&mut self) -> Result<()> {
        self.prompt("Enter website link: ")?;
        let Some(line) = self.read_line()? else {
            return Ok(());
        };
        let url = line.trim();
        if url.is_empty() {
            writeln!(self.output, "No link entered.")?;
            return Ok(());
        }

        match self.service.add_link(url) {
            Ok(AddResult::Added) => writeln!(self.output, "Link '{}' added successfully.", url)?,
            Ok(AddResult::AlreadyExists) => {
                writeln!(self.output, "Link '{}' is already saved.", url)?
            }
            Err(e) => writeln!(self.output, "Could not add link: {}", e)?,
        }
        Ok(())
    }

    async fn check_updates(&mut self) -> Result<()> {
        if self.service.tracked_links().is_empty() {
            writeln!(self.output, "No saved links found.")?;
            return Ok(());
        }

        match self.service.check_updates().await {
            Ok(report) => {
                for check in &report.checks {
                    writeln!(self.output, "{}", check)?;
                }
                writeln!(
                    self.output,
                    "{} checked, {} updated, {} failed.",
                    report.checks.len(),
                    report.updated_count(),
                    report.failed_count()
                )?;
            }
            Err(e) => writeln!(self.output, "Could not record updates: {}", e)?,
        }
        Ok(())
    }

    async fn view_links(&mut self) -> Result<()> {
        loop {
            let links = self.service.tracked_links();
            if links.is_empty() {
                writeln!(self.output, "No saved links found.")?;
                return Ok(());
            }

            writeln!(self.output)?;
            writeln!(self.output, "=== Saved Links ===")?;
            for (i, link) in links.iter().enumerate() {
                writeln!(
                    self.output,
                    "  {:<3} {} (Last updated: {})",
                    i + 1,
                    link.url,
                    link.last_updated
                )?;
            }
            self.prompt("Number to read articles, [Q]=Back: ")?;

            let Some(line) = self.read_line()? else {
                return Ok(());
            };
            let line = line.trim();
            if line.is_empty() || line.eq_ignore_ascii_case("q") {
                return Ok(());
            }

            let selected = line
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| links.get(idx));
            let Some(link) = selected else {
                writeln!(self.output, "Invalid selection: {}", line)?;
                continue;
            };

            writeln!(self.output, "Loading articles from {} ...", link.url)?;
            let collected = self.service.articles_for(&link.url).await;
            let heading = match collected.source {
                ArticleSource::Feed => "Feed Articles",
                ArticleSource::Scrape => "Page Articles",
                ArticleSource::Unavailable => {
                    writeln!(self.output, "Could not load {}.", link.url)?;
                    continue;
                }
            };
            self.browse_articles(heading, &collected.articles)?;
        }
    }

    fn view_saved(&mut self) -> Result<()> {
        let saved = self.service.saved_articles();
        if saved.is_empty() {
            writeln!(self.output, "No saved articles found.")?;
            return Ok(());
        }
        self.browse_articles("Saved Articles", &saved)
    }

    fn browse_articles(&mut self, heading: &str, articles: &[Article]) -> Result<()> {
        if articles.is_empty() {
            writeln!(self.output, "No articles found.")?;
            return Ok(());
        }

        let mut cursor = ListCursor::new(articles.len(), self.page_size);
        loop {
            self.render_page(heading, articles, &cursor)?;
            self.prompt("[J]down [K]up [N]ext page [P]rev page [S]ave/unsave [Q]back: ")?;

            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            match ListCommand::parse(&line) {
                ListCommand::Down => cursor.down(),
                ListCommand::Up => cursor.up(),
                ListCommand::PageDown => cursor.page_down(),
                ListCommand::PageUp => cursor.page_up(),
                ListCommand::ToggleSave => {
                    let article = &articles[cursor.index()];
                    match self.service.toggle_saved(article) {
                        Ok(true) => writeln!(self.output, "Saved.")?,
                        Ok(false) => writeln!(self.output, "Removed from saved articles.")?,
                        Err(e) => writeln!(self.output, "Could not update saved articles: {}", e)?,
                    }
                }
                ListCommand::Back => return Ok(()),
                ListCommand::Unknown => {
                    writeln!(self.output, "Unknown command: {}", line.trim())?;
                }
            }
        }
    }

    fn render_page(&mut self, heading: &str, articles: &[Article], cursor: &ListCursor) -> Result<()> {
        let (page, pages) = cursor.page_position();
        writeln!(self.output)?;
        writeln!(self.output, "=== {} ({}/{}) ===", heading, page, pages)?;

        for idx in cursor.page_range() {
            let article = &articles[idx];
            let pointer = if idx == cursor.index() { ">" } else { " " };
            let mark = if self.service.is_saved(article) { "[*]" } else { "[ ]" };
            let title = if article.title.is_empty() {
                DEFAULT_ARTICLE_TITLE
            } else {
                article.title.as_str()
            };

            writeln!(self.output, "{} {} {}", pointer, mark, clip(title))?;
            if !article.content.is_empty() {
                writeln!(self.output, "      {}", clip(&article.content))?;
            }
            writeln!(self.output, "  {}", "-".repeat(40))?;
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Read one line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// First [`DISPLAY_WIDTH`] characters of `text`, on one line.
fn clip(text: &str) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    crate::watch::truncate_chars(&flat, DISPLAY_WIDTH)
}
