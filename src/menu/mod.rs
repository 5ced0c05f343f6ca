//! Mirrors the remote prompt list into a platform menu.
//!
//! Only the data side lives here. Drawing the menu is up to the
//! [`MenuSurface`] implementation supplied by the host.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::auth::AuthService;
use crate::prompts::PromptService;
use crate::types::Prompt;

/// Menu item id of the "refresh prompts" entry.
pub const REFRESH_ITEM_ID: &str = "refresh-prompts";
const PROMPT_ITEM_PREFIX: &str = "prompt-";
const MAX_TITLE_CHARS: usize = 50;

/// One clickable prompt entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
}

impl MenuItem {
    pub fn for_prompt(prompt: &Prompt) -> Self {
        Self {
            id: format!("{PROMPT_ITEM_PREFIX}{}", prompt.id),
            title: truncate_title(&prompt.title),
        }
    }
}

/// What the menu should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuView {
    LoginRequired,
    LoadFailed,
    Empty,
    /// Prompt entries only. The host draws its own refresh entry with the
    /// id [`REFRESH_ITEM_ID`].
    Prompts(Vec<MenuItem>),
}

impl MenuView {
    pub fn from_prompts(prompts: &[Prompt]) -> Self {
        if prompts.is_empty() {
            Self::Empty
        } else {
            Self::Prompts(prompts.iter().map(MenuItem::for_prompt).collect())
        }
    }
}

/// Host-side menu renderer.
#[async_trait]
pub trait MenuSurface: Send + Sync {
    async fn render(&self, view: MenuView);
}

/// Keeps a menu surface in step with the prompt list.
pub struct MenuSync {
    auth: AuthService,
    prompts: PromptService,
    surface: Arc<dyn MenuSurface>,
    cached: Mutex<Vec<Prompt>>,
}

impl MenuSync {
    pub fn new(auth: AuthService, prompts: PromptService, surface: Arc<dyn MenuSurface>) -> Self {
        Self {
            auth,
            prompts,
            surface,
            cached: Mutex::new(Vec::new()),
        }
    }

    /// Check the session, fetch prompts, and redraw. Returns whether prompts loaded.
    pub async fn reload(&self) -> bool {
        if !self.auth.check_authentication().await.is_authenticated() {
            self.replace_cache(Vec::new());
            self.surface.render(MenuView::LoginRequired).await;
            return false;
        }
        match self.prompts.list(None).await {
            Ok(prompts) => {
                self.show_prompts(prompts).await;
                true
            }
            Err(err) => {
                warn!(error = %err, "failed to load prompts for menu");
                self.surface.render(MenuView::LoadFailed).await;
                false
            }
        }
    }

    /// Redraw from an already-fetched list.
    pub async fn show_prompts(&self, prompts: Vec<Prompt>) {
        let view = MenuView::from_prompts(&prompts);
        self.replace_cache(prompts);
        self.surface.render(view).await;
    }

    /// Prompt behind a clicked menu item. The refresh entry reloads and yields nothing.
    pub async fn on_click(&self, item_id: &str) -> Option<Prompt> {
        if item_id == REFRESH_ITEM_ID {
            self.reload().await;
            return None;
        }
        let prompt_id = item_id.strip_prefix(PROMPT_ITEM_PREFIX)?;
        let found = self
            .cached
            .lock()
            .ok()?
            .iter()
            .find(|prompt| prompt.id.to_string() == prompt_id)
            .cloned();
        if found.is_none() {
            debug!(item_id, "clicked menu item has no cached prompt");
        }
        found
    }

    pub fn cached(&self) -> Vec<Prompt> {
        self.cached
            .lock()
            .map(|cached| cached.clone())
            .unwrap_or_default()
    }

    fn replace_cache(&self, prompts: Vec<Prompt>) {
        if let Ok(mut cached) = self.cached.lock() {
            *cached = prompts;
        }
    }
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_CHARS {
        let head: String = title.chars().take(MAX_TITLE_CHARS).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResourceId;

    fn prompt(id: i64, title: &str) -> Prompt {
        Prompt {
            id: ResourceId::Number(id),
            title: title.to_string(),
            content: format!("content {id}"),
            description: String::new(),
            created_at: None,
        }
    }

    #[test]
    fn long_titles_are_truncated_on_char_boundaries() {
        let title = "é".repeat(60);
        let item = MenuItem::for_prompt(&prompt(1, &title));
        assert_eq!(item.title.chars().count(), MAX_TITLE_CHARS + 3);
        assert!(item.title.ends_with("..."));
    }

    #[test]
    fn short_titles_are_kept() {
        let item = MenuItem::for_prompt(&prompt(7, "Summarize"));
        assert_eq!(item.id, "prompt-7");
        assert_eq!(item.title, "Summarize");
    }

    #[test]
    fn empty_list_renders_empty_view() {
        assert_eq!(MenuView::from_prompts(&[]), MenuView::Empty);
    }
}
