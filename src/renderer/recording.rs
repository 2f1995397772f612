use super::{DigitFrame, DigitLayout, DigitRenderer, DigitStyle};

/// A frame that was applied to a slot, tagged with the rebuild it belongs to
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppliedFrame {
    /// Number of rebuilds that happened before this frame
    pub generation: usize,
    pub index: usize,
    pub frame: DigitFrame,
}

/// Renderer that keeps everything it is told in memory.
///
/// Useful for headless use and for asserting on the widget's output.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    style: Option<&'static DigitStyle>,
    layout: Option<DigitLayout>,
    slots: Vec<Option<DigitFrame>>,
    history: Vec<AppliedFrame>,
    rebuilds: usize,
    style_installs: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest frame of every slot, `None` for slots never drawn
    pub fn slots(&self) -> &[Option<DigitFrame>] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&DigitFrame> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn history(&self) -> &[AppliedFrame] {
        &self.history
    }

    pub fn layout(&self) -> Option<&DigitLayout> {
        self.layout.as_ref()
    }

    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    pub fn has_style(&self) -> bool {
        self.style.is_some()
    }

    /// How many times a style was actually installed (repeat installs are ignored)
    pub fn style_installs(&self) -> usize {
        self.style_installs
    }

    /// Digits currently shown, read back from slot offsets.
    ///
    /// Slots that were never drawn read as `None`.
    pub fn displayed_digits(&self) -> Vec<Option<u8>> {
        let height = self.layout.as_ref().map_or(1.0, |l| l.digit_height);
        self.slots
            .iter()
            .map(|slot| {
                slot.map(|frame| (-frame.offset / height).round().clamp(0.0, 9.0) as u8)
            })
            .collect()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl DigitRenderer for RecordingRenderer {
    fn install_style(&mut self, style: &'static DigitStyle) {
        if self.style.is_none() {
            self.style = Some(style);
            self.style_installs += 1;
        }
    }

    fn rebuild(&mut self, count: usize, layout: &DigitLayout) {
        self.rebuilds += 1;
        self.layout = Some(layout.clone());
        self.slots = vec![None; count];
    }

    fn apply(&mut self, index: usize, frame: &DigitFrame) {
        let Some(slot) = self.slots.get_mut(index) else {
            log::warn!("Frame for unknown slot {}", index);
            return;
        };
        *slot = Some(*frame);
        self.history.push(AppliedFrame {
            generation: self.rebuilds,
            index,
            frame: *frame,
        });
    }

    fn clear(&mut self) {
        self.slots.clear();
    }
}
