//! The drawing-engine seam.
//!
//! A chart handle is created once and then fed complete options. The only
//! partial update is the legend-selection patch used by the quick filters.

use crate::option::ChartOption;
use anyhow::Result;
use std::collections::BTreeMap;

pub trait RenderEngine {
    /// Replace the current configuration wholesale.
    fn set_option(&mut self, option: &ChartOption) -> Result<()>;

    /// Patch `legend.selected` of the current configuration, leaving data untouched.
    fn set_legend_selected(&mut self, selected: &BTreeMap<String, bool>) -> Result<()>;

    /// Container size changed; re-layout the current configuration.
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;
}

/// Keeps the current option in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    current: Option<ChartOption>,
    size: (u32, u32),
    replaces: usize,
    patches: usize,
}

impl MemoryEngine {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Default::default()
        }
    }

    pub fn current(&self) -> Option<&ChartOption> {
        self.current.as_ref()
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Number of full replaces so far.
    pub fn replace_count(&self) -> usize {
        self.replaces
    }

    /// Number of legend patches so far.
    pub fn patch_count(&self) -> usize {
        self.patches
    }
}

impl RenderEngine for MemoryEngine {
    fn set_option(&mut self, option: &ChartOption) -> Result<()> {
        self.current = Some(option.clone());
        self.replaces += 1;
        Ok(())
    }

    fn set_legend_selected(&mut self, selected: &BTreeMap<String, bool>) -> Result<()> {
        let option = self
            .current
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("legend patch before any option was set"))?;
        option.legend.selected = selected.clone();
        self.patches += 1;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.size = (width, height);
        Ok(())
    }
}

impl<E: RenderEngine + ?Sized> RenderEngine for Box<E> {
    fn set_option(&mut self, option: &ChartOption) -> Result<()> {
        (**self).set_option(option)
    }

    fn set_legend_selected(&mut self, selected: &BTreeMap<String, bool>) -> Result<()> {
        (**self).set_legend_selected(selected)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        (**self).resize(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_without_option_is_error() {
        let mut e = MemoryEngine::new(800, 600);
        assert!(e.set_legend_selected(&BTreeMap::new()).is_err());
        e.resize(1024, 768).unwrap();
        assert_eq!(e.size(), (1024, 768));
    }
}
