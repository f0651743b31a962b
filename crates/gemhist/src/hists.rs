use gemhist_wire::BuildError;

use crate::record::GemHistBuilder;

/// Per-plane hit histograms for a GEM detector readout.
///
/// Accumulates per-strip hit counts for the X and Y planes between monitoring
/// publishes, then emits them as one serialized `GEMHist` record. Strips
/// outside the configured bin range are counted as dropped rather than
/// resizing the histograms mid-run.
#[derive(Debug, Clone)]
pub struct Hists {
    xhist: Vec<u32>,
    yhist: Vec<u32>,
    hits: u64,
    dropped: u64,
}

impl Hists {
    /// Two zeroed histograms of `bins` strips each.
    pub fn new(bins: usize) -> Self {
        Self {
            xhist: vec![0; bins],
            yhist: vec![0; bins],
            hits: 0,
            dropped: 0,
        }
    }

    pub fn bins(&self) -> usize {
        self.xhist.len()
    }

    /// Count a hit on an X-plane strip. Counts saturate rather than wrap.
    pub fn bin_x(&mut self, strip: u16) {
        Self::bin(&mut self.xhist, strip, &mut self.hits, &mut self.dropped);
    }

    /// Count a hit on a Y-plane strip.
    pub fn bin_y(&mut self, strip: u16) {
        Self::bin(&mut self.yhist, strip, &mut self.hits, &mut self.dropped);
    }

    fn bin(hist: &mut [u32], strip: u16, hits: &mut u64, dropped: &mut u64) {
        match hist.get_mut(usize::from(strip)) {
            Some(bin) => {
                *bin = bin.saturating_add(1);
                *hits += 1;
            }
            None => *dropped += 1,
        }
    }

    /// Hits binned since construction or the last [`clear`](Hists::clear).
    pub fn hit_count(&self) -> u64 {
        self.hits
    }

    /// Hits whose strip fell outside the bin range.
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.hits == 0
    }

    pub fn clear(&mut self) {
        self.xhist.fill(0);
        self.yhist.fill(0);
        self.hits = 0;
        self.dropped = 0;
    }

    pub fn xhist(&self) -> &[u32] {
        &self.xhist
    }

    pub fn yhist(&self) -> &[u32] {
        &self.yhist
    }

    /// Serialize both planes as one `GEMHist` buffer without clearing.
    pub fn serialize(&self) -> Result<Vec<u8>, BuildError> {
        let mut builder = GemHistBuilder::new();
        builder.set_xhist(&self.xhist)?;
        builder.set_yhist(&self.yhist)?;
        builder.finish()
    }

    /// Serialize and reset for the next accumulation window.
    ///
    /// Returns `None` without clearing when nothing was binned, so idle
    /// periods publish no empty messages.
    pub fn produce(&mut self) -> Result<Option<Vec<u8>>, BuildError> {
        if self.is_empty() {
            return Ok(None);
        }
        let buf = self.serialize()?;
        self.clear();
        Ok(Some(buf))
    }
}
