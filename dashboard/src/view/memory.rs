//! In-memory page and chart backend.
//!
//! Used by the command-line binary to print what a page would show, and by
//! the tests to inspect rendering.

use std::collections::{BTreeMap, VecDeque};

use super::chart::{ChartBackend, ChartKind, ChartSpec};
use super::model::Content;
use super::{ElementId, Page};

/// Elements that start hidden
const HIDDEN_BY_DEFAULT: [ElementId; 3] = [
    ElementId::DeleteModalOverlay,
    ElementId::PredictionResults,
    ElementId::WastePreview,
];

#[derive(Debug, Clone, PartialEq)]
struct Element {
    content: Content,
    visible: bool,
}

impl Element {
    fn new(id: ElementId) -> Self {
        Self {
            content: Content::Empty,
            visible: !HIDDEN_BY_DEFAULT.contains(&id),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryPage {
    elements: BTreeMap<ElementId, Element>,
    alerts: Vec<String>,
    prompts: Vec<String>,
    answers: VecDeque<Option<String>>,
    reloads: usize,
}

impl MemoryPage {
    /// A page with no elements at all
    pub fn new() -> Self {
        Self::default()
    }

    /// A page carrying every known element
    pub fn full() -> Self {
        Self::with_elements(&ElementId::ALL)
    }

    pub fn with_elements(ids: &[ElementId]) -> Self {
        let mut page = Self::new();
        for id in ids {
            page.insert(*id);
        }
        page
    }

    pub fn insert(&mut self, id: ElementId) {
        self.elements.entry(id).or_insert_with(|| Element::new(id));
    }

    pub fn remove(&mut self, id: ElementId) {
        self.elements.remove(&id);
    }

    pub fn content(&self, id: ElementId) -> Option<&Content> {
        self.elements.get(&id).map(|e| &e.content)
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.content(id).and_then(Content::as_text)
    }

    pub fn is_visible(&self, id: ElementId) -> Option<bool> {
        self.elements.get(&id).map(|e| e.visible)
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Messages of every prompt shown so far
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn reloads(&self) -> usize {
        self.reloads
    }

    /// Queue the answer for the next prompt; `None` cancels it.
    /// Prompts with nothing queued are cancelled.
    pub fn queue_prompt_answer(&mut self, answer: Option<&str>) {
        self.answers.push_back(answer.map(str::to_string));
    }

    /// Every visible, non-empty element as `id:` followed by its content
    pub fn snapshot(&self) -> String {
        let mut sections = Vec::new();
        for (id, element) in &self.elements {
            if !element.visible || element.content == Content::Empty {
                continue;
            }
            let rendered = element.content.to_string();
            if rendered.contains('\n') {
                let indented: Vec<String> =
                    rendered.lines().map(|l| format!("  {}", l)).collect();
                sections.push(format!("{}:\n{}", id, indented.join("\n")));
            } else {
                sections.push(format!("{}: {}", id, rendered));
            }
        }
        sections.join("\n")
    }
}

impl Page for MemoryPage {
    fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    fn render(&mut self, id: ElementId, content: Content) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.content = content;
        }
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.visible = visible;
        }
    }

    fn alert(&mut self, message: &str) {
        tracing::info!("alert: {}", message);
        self.alerts.push(message.to_string());
    }

    fn prompt(&mut self, message: &str, _default: &str) -> Option<String> {
        self.prompts.push(message.to_string());
        self.answers.pop_front().flatten()
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }
}

/// What happened on a [`RecordingCharts`] backend, in order
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    Drawn {
        canvas: ElementId,
        handle: u64,
        kind: ChartKind,
    },
    Destroyed {
        handle: u64,
    },
    Cleared {
        canvas: ElementId,
    },
}

/// Chart backend that records calls instead of painting
#[derive(Debug)]
pub struct RecordingCharts {
    available: bool,
    next_handle: u64,
    live: BTreeMap<u64, (ElementId, ChartSpec)>,
    events: Vec<ChartEvent>,
}

impl Default for RecordingCharts {
    fn default() -> Self {
        Self {
            available: true,
            next_handle: 1,
            live: BTreeMap::new(),
            events: Vec::new(),
        }
    }
}

impl RecordingCharts {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend standing in for a page without a charting library
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::default()
        }
    }

    pub fn events(&self) -> &[ChartEvent] {
        &self.events
    }

    /// Number of instances drawn and not yet destroyed
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Specs of the live instances on one canvas
    pub fn live_on(&self, canvas: ElementId) -> Vec<&ChartSpec> {
        self.live
            .values()
            .filter(|(c, _)| *c == canvas)
            .map(|(_, spec)| spec)
            .collect()
    }
}

impl ChartBackend for RecordingCharts {
    type Handle = u64;

    fn available(&self) -> bool {
        self.available
    }

    fn draw(&mut self, canvas: ElementId, spec: &ChartSpec) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.live.insert(handle, (canvas, spec.clone()));
        self.events.push(ChartEvent::Drawn {
            canvas,
            handle,
            kind: spec.kind,
        });
        handle
    }

    fn destroy(&mut self, handle: u64) {
        self.live.remove(&handle);
        self.events.push(ChartEvent::Destroyed { handle });
    }

    fn clear(&mut self, canvas: ElementId) {
        self.events.push(ChartEvent::Cleared { canvas });
    }
}
