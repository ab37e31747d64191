use std::{io, rc::Rc};

use crossterm::event::{
    Event as TermEvent, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
};
use pad::PadStr;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{
        activity::{Activity, ActivityHandler, Change},
        app::AppData,
        event::Event,
    },
    dims::Dims,
    helpers::is_release,
    renderer::{Cell, Frame},
    settings::theme::{Theme, ThemeResolver},
    ui::{
        countdown::CountdownMessage,
        draw_box,
        supplement::{NavbarStyle, NoSupplement, Supplement},
        Rect, Screen,
    },
};

/// Prompt wording for the interactive add-item flow.
const INSERT_LABEL: &str = "Entity: ";
const INSERT_WATERMARK: &str = "Enter the entity name";

/// Stem of auto-generated labels.
const DEFAULT_LABEL_STEM: &str = "Nouveau";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Notification emitted on the menu's container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// Item at this index (its *current* position) was activated.
    Selected(usize),
}

#[derive(Debug)]
pub struct MenuStyles {
    pub text: &'static str,
    pub hover: &'static str,
}

impl Default for MenuStyles {
    fn default() -> Self {
        Self {
            text: "ui_menu_text",
            hover: "ui_menu_hover",
        }
    }
}

pub struct MenuConfig {
    pub labels: Vec<String>,
    pub spacing: i32,
    pub orientation: Orientation,
    pub origin: Dims,
    pub styles: MenuStyles,
}

impl MenuConfig {
    pub fn new(labels: impl Into<Vec<String>>) -> Self {
        Self {
            labels: labels.into(),
            spacing: 2,
            orientation: Orientation::default(),
            origin: Dims(2, 2),
            styles: MenuStyles::default(),
        }
    }

    pub fn new_from_strs(labels: &[&str]) -> Self {
        Self::new(labels.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    pub fn spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn origin(mut self, origin: Dims) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_styles(mut self, styles: MenuStyles) -> Self {
        self.styles = styles;
        self
    }
}

/// Navigable list of labeled items. The rendered layout is derived from
/// the label list on every query, so an activation always reports the
/// item's current index, no matter how the list was mutated since the
/// item first appeared.
pub struct Menu {
    labels: Vec<String>,
    spacing: i32,
    orientation: Orientation,
    origin: Dims,
    styles: MenuStyles,
    supplement: Rc<dyn Supplement>,
    navbar: Option<NavbarStyle>,
    hovered: Option<usize>,
    pending_insert: Option<usize>,
}

impl Menu {
    pub fn new(config: MenuConfig) -> Self {
        Self::with_supplement(config, Rc::new(NoSupplement))
    }

    pub fn with_supplement(config: MenuConfig, supplement: Rc<dyn Supplement>) -> Self {
        let MenuConfig {
            labels,
            spacing,
            orientation,
            origin,
            styles,
        } = config;

        Self {
            labels,
            spacing,
            orientation,
            origin,
            styles,
            supplement,
            navbar: None,
            hovered: None,
            pending_insert: None,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn set_spacing(&mut self, spacing: i32) -> &mut Self {
        self.spacing = spacing;
        self
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> &mut Self {
        self.orientation = orientation;
        self
    }

    /// One rect per label, in display order.
    pub fn item_rects(&self) -> Vec<Rect> {
        let mut rects = Vec::with_capacity(self.labels.len());
        let mut cursor = self.origin;

        for label in &self.labels {
            let width = (label.width() as i32).max(1);
            rects.push(Rect::sized_at(cursor, Dims(width, 1)));

            match self.orientation {
                Orientation::Horizontal => cursor.0 += width + self.spacing,
                Orientation::Vertical => cursor.1 += 1 + self.spacing,
            }
        }

        rects
    }

    /// Root rect bounding all items. The gap after the last item is not
    /// part of the container.
    pub fn container(&self) -> Rect {
        let rects = self.item_rects();

        match (rects.first(), rects.last()) {
            (Some(first), Some(last)) => {
                // vertical items can be wider than the last one
                let max_x = rects.iter().map(|r| r.end.0).max().unwrap_or(last.end.0);
                Rect::new(first.start, Dims(max_x, last.end.1))
            }
            _ => Rect::sized_at(self.origin, Dims(0, 0)),
        }
    }

    /// Index of the item under `pos`, read from the current layout.
    pub fn item_at(&self, pos: Dims) -> Option<usize> {
        self.item_rects().iter().position(|rect| rect.contains(pos))
    }

    /// Appends a label. The new item's index equals the previous length.
    pub fn add_item(&mut self, label: impl Into<String>) -> &mut Self {
        self.labels.push(label.into());

        // every append restyles when the collaborator is around,
        // whether or not the navbar was requested before
        if let Some(style) = self.supplement.navbar_style() {
            self.navbar = Some(style);
        }

        self
    }

    /// Inserts a label at `index` (clamped), shifting later items.
    pub fn insert_item(&mut self, index: usize, label: impl Into<String>) -> &mut Self {
        let index = index.min(self.labels.len());
        self.labels.insert(index, label.into());

        if self.navbar.is_some() {
            self.navbar = self.supplement.navbar_style();
        }

        self
    }

    /// Smallest `"Nouveau N"` not already used as a label.
    pub fn default_label(&self) -> String {
        let mut number = 1;
        loop {
            let candidate = format!("{} {}", DEFAULT_LABEL_STEM, number);
            if !self.labels.iter().any(|l| *l == candidate) {
                return candidate;
            }
            number += 1;
        }
    }

    /// Opens the interactive add-item flow: remembers the insert
    /// position and returns the collaborator's prompt activity to push.
    /// `None`, with a warning, when the collaborator has no prompt.
    pub fn add_item_at(&mut self, index: usize) -> Option<Activity> {
        let Some(prompt) = self.supplement.input_form(INSERT_LABEL, INSERT_WATERMARK) else {
            log::warn!("supplement does not provide an input form, cannot add item");
            return None;
        };

        self.pending_insert = Some(index.min(self.labels.len()));
        Some(prompt.into_activity())
    }

    /// Completes a pending add-item flow with the prompt's result.
    /// A blank or cancelled entry falls back to the generated default;
    /// cancelling (no result) inserts nothing.
    pub fn complete_add_item(&mut self, entry: Option<String>) -> &mut Self {
        let Some(index) = self.pending_insert.take() else {
            return self;
        };

        let Some(entry) = entry else {
            return self;
        };

        let trimmed = entry.trim();
        let label = if trimmed.is_empty() {
            self.default_label()
        } else {
            trimmed.to_string()
        };

        self.insert_item(index, label)
    }

    pub fn has_pending_insert(&self) -> bool {
        self.pending_insert.is_some()
    }

    /// Applies the collaborator's navbar style bundle; warns and keeps
    /// the plain look when the capability is missing.
    pub fn apply_navbar_style(&mut self) -> &mut Self {
        match self.supplement.navbar_style() {
            Some(style) => self.navbar = Some(style),
            None => log::warn!("supplement does not provide navbar styling"),
        }
        self
    }

    /// Builds and starts the collaborator's countdown banner; `None`,
    /// with a warning, when the capability is missing.
    pub fn message_shutdown(&self, duration: u64, template: &str) -> Option<CountdownMessage> {
        let Some(mut message) = self.supplement.countdown(duration, template) else {
            log::warn!("supplement does not provide a countdown message");
            return None;
        };

        message.start();
        Some(message)
    }

    /// Updates hover state from a mouse position.
    pub fn hover(&mut self, pos: Dims) {
        self.hovered = self.item_at(pos);
    }

    fn select(&mut self, forward: bool) {
        if self.labels.is_empty() {
            return;
        }

        let count = self.labels.len() as isize;
        self.hovered = Some(match (self.hovered, forward) {
            (None, _) => 0,
            (Some(i), true) => ((i as isize + 1) % count) as usize,
            (Some(i), false) => ((i as isize - 1).rem_euclid(count)) as usize,
        });
    }

    /// Interprets one event against the current layout, updating hover
    /// state and returning the activation notification if one fired.
    pub fn handle_event(&mut self, event: &Event) -> Option<MenuEvent> {
        match event {
            Event::Term(TermEvent::Key(KeyEvent { code, kind, .. })) if !is_release(*kind) => {
                match code {
                    KeyCode::Up | KeyCode::Left => self.select(false),
                    KeyCode::Down | KeyCode::Right => self.select(true),
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        return self.hovered.map(MenuEvent::Selected);
                    }
                    _ => {}
                }
            }
            Event::Term(TermEvent::Mouse(MouseEvent {
                kind, column, row, ..
            })) => {
                let pos = Dims(*column as i32, *row as i32);
                match kind {
                    MouseEventKind::Moved => self.hover(pos),
                    MouseEventKind::Up(MouseButton::Left) => {
                        if let Some(index) = self.item_at(pos) {
                            self.hovered = Some(index);
                            return Some(MenuEvent::Selected(index));
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }

        None
    }

    pub fn draw(&self, frame: &mut Frame, theme: &Theme) {
        let rects = self.item_rects();

        let (item_style, hover_style) = match &self.navbar {
            Some(navbar) => {
                let container = self.container().margin(Dims(-1, -1));
                frame.fill_rect(container, Cell::styled(' ', theme[navbar.bg]));
                draw_box(frame, container.start, container.size(), theme[navbar.border]);
                (theme[navbar.item], theme[navbar.hover])
            }
            None => (theme[self.styles.text], theme[self.styles.hover]),
        };

        let container_width = self.container().size().0 as usize;

        for (index, (label, rect)) in self.labels.iter().zip(&rects).enumerate() {
            let style = if self.hovered == Some(index) {
                hover_style
            } else {
                item_style
            };

            // pad stacked navbar items to the full width so the hover
            // highlight forms an even column
            if self.orientation == Orientation::Vertical && self.navbar.is_some() {
                frame.draw(rect.start, label.pad_to_width(container_width), style);
            } else {
                frame.draw(rect.start, label, style);
            }
        }
    }
}

/// Ready-made activity around a [`Menu`]: routes events, completes the
/// add-item flow and forwards activations to a subscriber.
pub struct MenuActivity {
    menu: Menu,
    #[allow(clippy::type_complexity)]
    on_select: Option<Box<dyn FnMut(usize, &str, &mut AppData)>>,
}

impl MenuActivity {
    pub fn new(menu: Menu) -> Self {
        Self {
            menu,
            on_select: None,
        }
    }

    pub fn on_select(mut self, handler: impl FnMut(usize, &str, &mut AppData) + 'static) -> Self {
        self.on_select = Some(Box::new(handler));
        self
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut Menu {
        &mut self.menu
    }

    pub fn into_activity(self) -> Activity {
        Activity::new("menu", Box::new(self))
    }
}

impl ActivityHandler for MenuActivity {
    fn update(&mut self, events: Vec<Event>, data: &mut AppData) -> Option<Change> {
        for event in events {
            match event {
                Event::ActiveAfterPop(res) => {
                    let entry = res
                        .and_then(|res| res.downcast::<String>().ok())
                        .map(|boxed| *boxed);
                    self.menu.complete_add_item(entry);
                }
                Event::Term(TermEvent::Key(KeyEvent { code, kind, .. }))
                    if !is_release(kind) && matches!(code, KeyCode::Esc | KeyCode::Char('q')) =>
                {
                    return Some(Change::pop_top());
                }
                ref event => {
                    if let Some(MenuEvent::Selected(index)) = self.menu.handle_event(event) {
                        if let Some(handler) = &mut self.on_select {
                            let label = self.menu.labels()[index].clone();
                            handler(index, &label, data);
                        }
                    }
                }
            }
        }

        None
    }

    fn screen(&self) -> &dyn Screen {
        self
    }
}

impl Screen for MenuActivity {
    fn draw(&self, frame: &mut Frame, theme: &Theme) -> Result<(), io::Error> {
        self.menu.draw(frame, theme);
        Ok(())
    }
}

pub fn menu_theme_resolver() -> ThemeResolver {
    let mut resolver = ThemeResolver::new();

    resolver
        .link("ui_menu_text", "text")
        .link("ui_menu_hover", "ui_menu_text");

    resolver
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(labels: &[&str], spacing: i32, orientation: Orientation) -> Menu {
        Menu::new(
            MenuConfig::new_from_strs(labels)
                .spacing(spacing)
                .orientation(orientation)
                .origin(Dims(0, 0)),
        )
    }

    #[test]
    fn one_item_per_label_after_construction() {
        for n in 0..6 {
            let labels: Vec<&str> = ["a", "b", "c", "d", "e"][..n].to_vec();
            let menu = menu(&labels, 3, Orientation::Horizontal);
            assert_eq!(menu.item_rects().len(), n);
            assert_eq!(menu.len(), n);
        }
    }

    #[test]
    fn activation_reports_current_index() {
        let menu = menu(&["Home", "Products", "Contact"], 5, Orientation::Horizontal);

        for (i, rect) in menu.item_rects().iter().enumerate() {
            assert_eq!(menu.item_at(rect.start), Some(i));
            assert_eq!(menu.item_at(rect.end), Some(i));
        }
    }

    #[test]
    fn indices_follow_items_after_front_insertion() {
        let mut menu = menu(&["Home", "Contact"], 2, Orientation::Vertical);
        menu.insert_item(0, "Products");

        assert_eq!(menu.labels(), ["Products", "Home", "Contact"]);
        for (i, rect) in menu.item_rects().iter().enumerate() {
            assert_eq!(menu.item_at(rect.start), Some(i));
        }
    }

    #[test]
    fn add_item_appends_at_previous_length() {
        let mut menu = menu(&["a", "b"], 1, Orientation::Horizontal);
        let previous_len = menu.len();

        menu.add_item("c");

        assert_eq!(menu.len(), previous_len + 1);
        assert_eq!(menu.labels().last().map(String::as_str), Some("c"));
        let last_rect = *menu.item_rects().last().unwrap();
        assert_eq!(menu.item_at(last_rect.start), Some(previous_len));
    }

    #[test]
    fn default_label_avoids_collisions() {
        let menu0 = menu(&[], 1, Orientation::Horizontal);
        assert_eq!(menu0.default_label(), "Nouveau 1");

        let menu1 = menu(&["Nouveau 1"], 1, Orientation::Horizontal);
        assert_eq!(menu1.default_label(), "Nouveau 2");

        let menu2 = menu(&["Nouveau 1", "Nouveau 2", "Other"], 1, Orientation::Horizontal);
        assert_eq!(menu2.default_label(), "Nouveau 3");
    }

    #[test]
    fn horizontal_layout_spaces_items_without_trailing_gap() {
        let menu = menu(&["Home", "Products", "Contact"], 50, Orientation::Horizontal);
        let rects = menu.item_rects();

        // widths: 4, 8, 7
        assert_eq!(rects[0].start.0, 0);
        assert_eq!(rects[1].start.0, 4 + 50);
        assert_eq!(rects[2].start.0, 4 + 50 + 8 + 50);

        let container = menu.container();
        assert_eq!(container.end, rects[2].end);
        assert_eq!(container.size().1, 1);
    }

    #[test]
    fn vertical_layout_stacks_with_spacing_rows() {
        let menu = menu(&["a", "bb"], 3, Orientation::Vertical);
        let rects = menu.item_rects();

        assert_eq!(rects[0].start, Dims(0, 0));
        assert_eq!(rects[1].start, Dims(0, 4));

        // container spans the widest item
        assert_eq!(menu.container().size().0, 2);
    }

    #[test]
    fn setters_are_idempotent_and_chainable() {
        let mut menu = menu(&["a", "b", "c"], 2, Orientation::Horizontal);

        menu.set_spacing(7).set_orientation(Orientation::Vertical);
        let once = menu.item_rects();

        menu.set_spacing(7).set_orientation(Orientation::Vertical);
        assert_eq!(menu.item_rects(), once);
    }

    #[test]
    fn add_item_at_without_collaborator_degrades() {
        let mut menu = menu(&["a"], 1, Orientation::Horizontal);
        assert!(menu.add_item_at(0).is_none());
        assert!(!menu.has_pending_insert());
        assert!(menu.message_shutdown(5, "{seconds}").is_none());
    }

    #[test]
    fn insert_flow_uses_entry_or_generated_default() {
        let mut menu = Menu::with_supplement(
            MenuConfig::new_from_strs(&["Nouveau 1"]).origin(Dims(0, 0)),
            Rc::new(crate::ui::supplement::Embellish),
        );

        let prompt = menu.add_item_at(1);
        assert!(prompt.is_some());
        assert!(menu.has_pending_insert());

        menu.complete_add_item(Some("   ".to_string()));
        assert_eq!(menu.labels(), ["Nouveau 1", "Nouveau 2"]);

        menu.add_item_at(0);
        menu.complete_add_item(Some("Typed".to_string()));
        assert_eq!(menu.labels(), ["Typed", "Nouveau 1", "Nouveau 2"]);

        // cancelled prompt inserts nothing
        menu.add_item_at(0);
        menu.complete_add_item(None);
        assert_eq!(menu.len(), 3);
    }

    #[test]
    fn insert_position_is_clamped() {
        let mut menu = menu(&["a"], 1, Orientation::Horizontal);
        menu.insert_item(10, "b");
        assert_eq!(menu.labels(), ["a", "b"]);
    }

    #[test]
    fn mouse_click_emits_selected_with_current_index() {
        let mut menu = menu(&["Home", "Products"], 3, Orientation::Horizontal);
        let rects = menu.item_rects();

        let click = |pos: Dims| {
            Event::Term(TermEvent::Mouse(MouseEvent {
                kind: MouseEventKind::Up(MouseButton::Left),
                column: pos.0 as u16,
                row: pos.1 as u16,
                modifiers: crossterm::event::KeyModifiers::NONE,
            }))
        };

        assert_eq!(
            menu.handle_event(&click(rects[1].start)),
            Some(MenuEvent::Selected(1))
        );

        // a click in the gap hits nothing
        let gap = Dims(rects[0].end.0 + 1, rects[0].start.1);
        assert_eq!(menu.handle_event(&click(gap)), None);

        // insertion shifts the layout; the same physical spot now
        // reports the shifted item's new index
        menu.insert_item(0, "X");
        let new_rects = menu.item_rects();
        assert_eq!(
            menu.handle_event(&click(new_rects[2].start)),
            Some(MenuEvent::Selected(2))
        );
    }

    #[test]
    fn keyboard_selection_wraps() {
        let mut menu = menu(&["a", "b", "c"], 1, Orientation::Vertical);

        menu.select(false);
        assert_eq!(menu.hovered(), Some(0));
        menu.select(false);
        assert_eq!(menu.hovered(), Some(2));
        menu.select(true);
        assert_eq!(menu.hovered(), Some(0));
    }

    #[test]
    fn menu_activity_forwards_activation() {
        use std::cell::RefCell;

        let menu = menu(&["One", "Two"], 2, Orientation::Horizontal);
        let rects = menu.item_rects();

        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        let mut activity = MenuActivity::new(menu)
            .on_select(move |index, label, _| *sink.borrow_mut() = Some((index, label.to_string())));

        let click = Event::Term(TermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: rects[1].start.0 as u16,
            row: rects[1].start.1 as u16,
            modifiers: crossterm::event::KeyModifiers::NONE,
        }));

        let mut data = AppData::for_tests();
        assert!(activity.update(vec![click], &mut data).is_none());
        assert_eq!(*seen.borrow(), Some((1, "Two".to_string())));
    }

    #[test]
    fn menu_activity_completes_insert_after_pop() {
        use crate::app::activity::ActivityResult;

        let mut menu = Menu::with_supplement(
            MenuConfig::new_from_strs(&["a"]).origin(Dims(0, 0)),
            Rc::new(crate::ui::supplement::Embellish),
        );
        menu.add_item_at(0);

        let mut activity = MenuActivity::new(menu);
        let mut data = AppData::for_tests();

        let res: Option<ActivityResult> = Some(Box::new("New".to_string()));
        activity.update(vec![Event::ActiveAfterPop(res)], &mut data);

        assert_eq!(activity.menu().labels(), ["New", "a"]);
    }

    #[test]
    fn hover_follows_mouse_position() {
        let mut menu = menu(&["aa", "bb"], 2, Orientation::Horizontal);
        let rects = menu.item_rects();

        menu.hover(rects[1].start);
        assert_eq!(menu.hovered(), Some(1));
        menu.hover(Dims(100, 100));
        assert_eq!(menu.hovered(), None);
    }
}
