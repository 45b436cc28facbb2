//! The page surface the controller drives.
//!
//! `Page` is the element contract: a busy/ready indicator pair, a drop zone,
//! a hidden file input, an error display and the browser location. A browser
//! host implements it over the DOM using the ids in `ElementIds`;
//! `MemoryPage` models the same elements in memory for headless hosts.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::config::IntakeConfig;

pub trait Page {
    /// Show the spinner and hide the idle text, or the reverse.
    fn set_busy(&self, busy: bool);

    fn set_drop_zone_active(&self, active: bool);

    /// Programmatically click the hidden file input.
    fn open_file_chooser(&self);

    /// Replace the error display's text and make it visible.
    fn show_error(&self, text: &str);

    /// Send the browser to `location`.
    fn navigate(&self, location: &str);
}

/// State of one modelled element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub text: String,
    pub visible: bool,
    pub classes: Vec<String>,
    pub clicks: usize,
}

#[derive(Debug, Default)]
struct PageState {
    elements: HashMap<String, Element>,
    busy_history: Vec<bool>,
    locations: Vec<String>,
}

/// In-memory page keyed by the configured element ids.
#[derive(Debug)]
pub struct MemoryPage {
    config: IntakeConfig,
    state: RefCell<PageState>,
}

impl MemoryPage {
    /// Elements start as the page ships them: idle text shown, spinner and
    /// error display hidden, drop zone inactive.
    pub fn new(config: &IntakeConfig) -> Self {
        let ids = &config.elements;
        let mut elements = HashMap::new();
        for id in [&ids.drop_zone, &ids.file_input, &ids.error_display, &ids.busy_spinner] {
            elements.insert(id.clone(), Element::default());
        }
        elements.insert(
            ids.idle_text.clone(),
            Element {
                visible: true,
                ..Default::default()
            },
        );
        Self {
            config: config.clone(),
            state: RefCell::new(PageState {
                elements,
                ..Default::default()
            }),
        }
    }

    pub fn element(&self, id: &str) -> Option<Element> {
        self.state.borrow().elements.get(id).cloned()
    }

    pub fn error_display(&self) -> Element {
        self.element(&self.config.elements.error_display)
            .unwrap_or_default()
    }

    pub fn is_busy(&self) -> bool {
        self.element(&self.config.elements.busy_spinner)
            .is_some_and(|spinner| spinner.visible)
    }

    pub fn is_drop_zone_active(&self) -> bool {
        self.element(&self.config.elements.drop_zone)
            .is_some_and(|zone| zone.classes.contains(&self.config.drag_active_class))
    }

    /// Every busy/ready write, in order.
    pub fn busy_history(&self) -> Vec<bool> {
        self.state.borrow().busy_history.clone()
    }

    /// Every navigation, in order.
    pub fn locations(&self) -> Vec<String> {
        self.state.borrow().locations.clone()
    }

    pub fn chooser_opens(&self) -> usize {
        self.element(&self.config.elements.file_input)
            .map_or(0, |input| input.clicks)
    }

    fn with_element(&self, id: &str, f: impl FnOnce(&mut Element)) {
        let mut state = self.state.borrow_mut();
        f(state.elements.entry(id.to_string()).or_default());
    }
}

impl Page for MemoryPage {
    fn set_busy(&self, busy: bool) {
        let ids = &self.config.elements;
        self.with_element(&ids.idle_text, |text| text.visible = !busy);
        self.with_element(&ids.busy_spinner, |spinner| spinner.visible = busy);
        self.state.borrow_mut().busy_history.push(busy);
    }

    fn set_drop_zone_active(&self, active: bool) {
        let class = &self.config.drag_active_class;
        self.with_element(&self.config.elements.drop_zone, |zone| {
            zone.classes.retain(|c| c != class);
            if active {
                zone.classes.push(class.clone());
            }
        });
    }

    fn open_file_chooser(&self) {
        self.with_element(&self.config.elements.file_input, |input| input.clicks += 1);
    }

    fn show_error(&self, text: &str) {
        self.with_element(&self.config.elements.error_display, |display| {
            display.text = text.to_string();
            display.visible = true;
        });
    }

    fn navigate(&self, location: &str) {
        self.state.borrow_mut().locations.push(location.to_string());
    }
}
