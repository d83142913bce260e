//! Total ion current of a run

use log::debug;

use crate::engine::ExtractionError;
use crate::source::{ScanRecord, SpectrumSource};

/// Sum every intensity of every MS1 spectrum in `source`
///
/// Reads the whole source. Instrument-reported TIC values are not consulted.
pub fn total_ion_current<S: SpectrumSource>(source: &mut S) -> Result<f64, ExtractionError> {
    let mut tic = 0.0;
    let mut ms1_spectra = 0usize;

    while let Some(spectrum) = source
        .next_spectrum()
        .map_err(ExtractionError::source_read)?
    {
        if spectrum.ms_level() != 1 {
            continue;
        }
        ms1_spectra += 1;
        tic += spectrum.intensities().iter().sum::<f64>();
    }

    debug!(
        "{}: TIC {} over {} MS1 spectra",
        source.identifier(),
        tic,
        ms1_spectra
    );
    Ok(tic)
}
