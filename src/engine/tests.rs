use super::*;
use crate::source::{MemorySource, MemorySpectrum, SpectrumBuilder};
use crate::window::TimeBound;

/// Three MS1 scans at 1, 2 and 3 s; only the scan at 2 s carries peaks of interest
fn three_scan_run() -> Vec<MemorySpectrum> {
    vec![
        SpectrumBuilder::new("controllerType=0 controllerNumber=1 scan=101")
            .retention_time(1.0)
            .add_peak(300.0, 10.0)
            .build(),
        SpectrumBuilder::new("controllerType=0 controllerNumber=1 scan=102")
            .retention_time(2.0)
            .add_peak(500.1, 1000.0)
            .add_peak(750.0, 50.0)
            .build(),
        SpectrumBuilder::new("controllerType=0 controllerNumber=1 scan=103")
            .retention_time(3.0)
            .add_peak(1200.0, 5.0)
            .build(),
    ]
}

fn window(mz_lower: f64, mz_upper: f64, t_lower: f64, t_upper: TimeBound) -> Window {
    Window::new(mz_lower, mz_upper, t_lower, t_upper).unwrap()
}

#[test]
fn test_single_window_single_match() {
    let mut source = MemorySource::new("run.mzML", three_scan_run());
    let window_a = window(500.0, 500.2, 0.0, TimeBound::Bounded(5.0));

    let extraction = extract(&mut source, &[window_a]).unwrap();
    let chromatogram = &extraction.chromatograms[0];

    assert_eq!(chromatogram.source(), "run.mzML");
    assert_eq!(
        chromatogram.centroids(),
        &[Centroid::new(102, 2.0, 500.1, 1000.0)]
    );

    let ion = chromatogram.ion_chromatogram();
    assert_eq!(ion.times, vec![2.0]);
    assert_eq!(ion.intensities, vec![1000.0]);
    assert_eq!(chromatogram.ion_count(), 1000.0);
}

#[test]
fn test_time_limited_window_matches_both_points() {
    let mut source = MemorySource::new("run.mzML", three_scan_run());
    let window_b = window(0.0, 1000.0, 1.5, TimeBound::Bounded(2.5));

    let extraction = extract(&mut source, &[window_b]).unwrap();
    let chromatogram = &extraction.chromatograms[0];

    assert_eq!(chromatogram.scan_numbers(), vec![102, 102]);
    assert_eq!(chromatogram.mzs(), vec![500.1, 750.0]);

    let ion = chromatogram.ion_chromatogram();
    assert_eq!(ion.times, vec![2.0]);
    assert_eq!(ion.intensities, vec![1050.0]);
    assert_eq!(chromatogram.ion_count(), 1050.0);
    // rt = 3.0 finishes the window before the source runs out
    assert_eq!(extraction.stats.early_exit_at, Some(3.0));
}

#[test]
fn test_ms2_spectra_are_skipped() {
    let spectra = vec![
        SpectrumBuilder::new("scan=1")
            .ms_level(2)
            .retention_time(1.0)
            .add_peak(500.1, 99.0)
            .build(),
        SpectrumBuilder::new("scan=2")
            .retention_time(1.1)
            .add_peak(500.1, 10.0)
            .build(),
    ];
    let mut source = MemorySource::new("run", spectra);
    let extraction = extract(&mut source, &[Window::mz_only(500.0, 500.2).unwrap()]).unwrap();

    assert_eq!(
        extraction.chromatograms[0].centroids(),
        &[Centroid::new(2, 1.1, 500.1, 10.0)]
    );
    assert_eq!(extraction.stats.spectra_read, 2);
    assert_eq!(extraction.stats.ms1_spectra, 1);
}

#[test]
fn test_early_exit_stops_reading() {
    let spectra: Vec<_> = (1..=100)
        .map(|i| {
            SpectrumBuilder::new(format!("scan={}", i))
                .retention_time(i as f64)
                .add_peak(500.0, i as f64)
                .build()
        })
        .collect();
    let mut source = MemorySource::new("run", spectra);
    let windows = [
        window(499.0, 501.0, 0.0, TimeBound::Bounded(10.0)),
        window(499.0, 501.0, 5.0, TimeBound::Bounded(20.0)),
    ];

    let extraction = extract(&mut source, &windows).unwrap();

    // the spectrum at 21 s finishes the last window
    assert_eq!(source.spectra_served(), 21);
    assert_eq!(source.remaining(), 79);
    assert_eq!(extraction.stats.early_exit_at, Some(21.0));
    assert_eq!(extraction.chromatograms[0].len(), 10);
    assert_eq!(extraction.chromatograms[1].len(), 16);
}

#[test]
fn test_unbounded_window_reads_whole_source() {
    let spectra: Vec<_> = (1..=10)
        .map(|i| {
            SpectrumBuilder::new(format!("scan={}", i))
                .retention_time(i as f64)
                .add_peak(500.0, 1.0)
                .build()
        })
        .collect();
    let mut source = MemorySource::new("run", spectra);
    let windows = [
        window(499.0, 501.0, 0.0, TimeBound::Bounded(2.0)),
        Window::mz_only(499.0, 501.0).unwrap(),
    ];

    let extraction = extract(&mut source, &windows).unwrap();

    assert_eq!(source.remaining(), 0);
    assert_eq!(extraction.stats.early_exit_at, None);
    assert_eq!(extraction.chromatograms[0].len(), 2);
    assert_eq!(extraction.chromatograms[1].len(), 10);
    assert_eq!(extraction.chromatograms[1].max_time(), Some(10.0));
}

#[test]
fn test_upper_bound_is_inclusive() {
    let mut source = MemorySource::new("run.mzML", three_scan_run());
    let edge = window(0.0, 2000.0, 0.0, TimeBound::Bounded(2.0));

    let extraction = extract(&mut source, &[edge]).unwrap();

    assert_eq!(extraction.chromatograms[0].scan_numbers(), vec![101, 102, 102]);
}

#[test]
fn test_overlapping_windows_each_accumulate() {
    let mut source = MemorySource::new("run.mzML", three_scan_run());
    let windows = [
        window(500.0, 500.2, 0.0, TimeBound::Bounded(5.0)),
        window(400.0, 600.0, 1.5, TimeBound::Bounded(2.5)),
    ];

    let extraction = extract(&mut source, &windows).unwrap();

    assert_eq!(
        extraction.chromatograms[0].centroids(),
        extraction.chromatograms[1].centroids()
    );
}

#[test]
fn test_disjoint_windows_do_not_share_centroids() {
    let mut source = MemorySource::new("run.mzML", three_scan_run());
    let windows = [
        window(0.0, 2000.0, 0.0, TimeBound::Bounded(1.5)),
        window(0.0, 2000.0, 2.5, TimeBound::Bounded(3.5)),
    ];

    let extraction = extract(&mut source, &windows).unwrap();

    assert_eq!(extraction.chromatograms[0].scan_numbers(), vec![101]);
    assert_eq!(extraction.chromatograms[1].scan_numbers(), vec![103]);
}

#[test]
fn test_no_match_is_empty_not_error() {
    let mut source = MemorySource::new("run.mzML", three_scan_run());
    let nowhere = Window::mz_only(9000.0, 9001.0).unwrap();

    let extraction = extract(&mut source, &[nowhere]).unwrap();

    assert!(extraction.chromatograms[0].is_empty());
    assert_eq!(extraction.empty_chromatograms().count(), 1);
    assert_eq!(extraction.chromatograms[0].min_time(), None);
}

#[test]
fn test_no_windows_reads_nothing() {
    let mut source = MemorySource::new("run.mzML", three_scan_run());
    let extraction = extract(&mut source, &[]).unwrap();

    assert!(extraction.chromatograms.is_empty());
    assert_eq!(source.spectra_served(), 0);
}

#[test]
fn test_skip_zero_intensity() {
    let spectra = vec![SpectrumBuilder::new("scan=1")
        .retention_time(1.0)
        .add_peak(500.0, 0.0)
        .add_peak(500.1, 7.0)
        .build()];
    let engine =
        ExtractionEngine::with_config(ExtractionConfig::default().with_skip_zero_intensity(true));
    let mut source = MemorySource::new("run", spectra);

    let extraction = engine
        .extract(&mut source, &[Window::mz_only(499.0, 501.0).unwrap()])
        .unwrap();

    assert_eq!(extraction.chromatograms[0].mzs(), vec![500.1]);
}

#[test]
fn test_missing_scan_number_uses_position() {
    let spectra = vec![
        SpectrumBuilder::new("index=0").retention_time(1.0).build(),
        SpectrumBuilder::new("index=1")
            .retention_time(2.0)
            .add_peak(500.0, 1.0)
            .build(),
    ];
    let mut source = MemorySource::new("run", spectra);

    let extraction = extract(&mut source, &[Window::mz_only(499.0, 501.0).unwrap()]).unwrap();

    assert_eq!(extraction.chromatograms[0].scan_numbers(), vec![2]);
}

#[test]
fn test_missing_retention_time_is_an_error() {
    let spectra = vec![SpectrumBuilder::new("scan=1").add_peak(500.0, 1.0).build()];
    let mut source = MemorySource::new("run", spectra);

    let err = extract(&mut source, &[Window::mz_only(499.0, 501.0).unwrap()]).unwrap_err();

    assert!(matches!(err, ExtractionError::MissingRetentionTime { .. }));
}

#[test]
fn test_array_length_mismatch_is_an_error() {
    let spectrum = MemorySpectrum {
        id: "scan=1".to_string(),
        ms_level: 1,
        retention_time: Some(1.0),
        mz_array: vec![500.0, 501.0],
        intensity_array: vec![1.0],
    };
    let mut source = MemorySource::new("run", vec![spectrum]);

    let err = extract(&mut source, &[Window::mz_only(499.0, 501.0).unwrap()]).unwrap_err();

    assert!(matches!(
        err,
        ExtractionError::ArrayLengthMismatch {
            mz_len: 2,
            intensity_len: 1,
            ..
        }
    ));
}

#[derive(Debug, thiserror::Error)]
#[error("disk on fire")]
struct BrokenDisk;

/// Yields `good` spectra, then fails
struct FailingSource {
    good: Vec<MemorySpectrum>,
}

impl SpectrumSource for FailingSource {
    type Spectrum = MemorySpectrum;
    type Error = BrokenDisk;

    fn identifier(&self) -> &str {
        "broken.mzML"
    }

    fn next_spectrum(&mut self) -> Result<Option<MemorySpectrum>, BrokenDisk> {
        if self.good.is_empty() {
            Err(BrokenDisk)
        } else {
            Ok(Some(self.good.remove(0)))
        }
    }
}

#[test]
fn test_source_failure_returns_no_partial_results() {
    let mut source = FailingSource {
        good: three_scan_run(),
    };

    let err = extract(&mut source, &[Window::mz_only(0.0, 2000.0).unwrap()]).unwrap_err();

    assert!(err.is_source_read());
    assert!(err.to_string().contains("disk on fire"));
}

#[test]
fn test_extraction_is_deterministic() {
    let windows = [
        window(500.0, 500.2, 0.0, TimeBound::Bounded(5.0)),
        Window::mz_only(0.0, 2000.0).unwrap(),
    ];
    let first = extract(&mut MemorySource::new("run", three_scan_run()), &windows).unwrap();
    let second = extract(&mut MemorySource::new("run", three_scan_run()), &windows).unwrap();

    assert_eq!(first.chromatograms, second.chromatograms);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_chromatogram_for_window() {
    let windows = [
        window(500.0, 500.2, 0.0, TimeBound::Bounded(5.0)),
        window(749.0, 751.0, 0.0, TimeBound::Bounded(5.0)),
    ];
    let extraction = extract(&mut MemorySource::new("run", three_scan_run()), &windows).unwrap();

    let second = extraction.chromatogram_for(&windows[1]).unwrap();
    assert_eq!(second.mzs(), vec![750.0]);
    assert!(extraction
        .chromatogram_for(&Window::mz_only(1.0, 2.0).unwrap())
        .is_none());
}
