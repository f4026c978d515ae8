//! Persistence of wavefunction snapshots.
//!
//! The propagator hands owned copies of its state to an [`Emitter`]. The main
//! implementation, [`SnapshotWriter`], writes each copy to its own text file
//! on a dedicated thread so that the main loop never waits on I/O. Every
//! record holds one line per sampled grid point,
//! ```text
//!        0     0.000000
//!       10     0.000000
//!      ...
//! ```
//! with the grid index right-justified in 8 columns and the probability
//! `f² + g²` right-justified in 12 columns with 6 decimals.

use std::{
    fs,
    io::{ self, BufWriter, Write },
    path::{ Path, PathBuf },
    thread::{ self, JoinHandle },
};
use crate::{
    config::Params,
    error::EmitError,
    state::Wavefunction,
};

pub type EmitResult<T> = Result<T, EmitError>;

/// Receives copies of the wavefunction during a run.
pub trait Emitter {
    /// Take ownership of a snapshot.
    fn emit(&mut self, wf: Wavefunction);
}

impl Emitter for Vec<Wavefunction> {
    fn emit(&mut self, wf: Wavefunction) { self.push(wf); }
}

/// Write every `stride`-th point of the probability density to `out`.
pub fn write_density<W>(out: &mut W, wf: &Wavefunction, stride: usize)
    -> io::Result<()>
where W: Write
{
    let iter
        = wf.f().iter().zip(wf.g()).enumerate()
        .step_by(stride.max(1));
    for (ix, (fk, gk)) in iter {
        writeln!(out, "{:>8} {:>12.6}", ix, fk * fk + gk * gk)?;
    }
    Ok(())
}

fn write_snapshot(path: &Path, wf: &Wavefunction, stride: usize)
    -> EmitResult<()>
{
    let to_err = |source: io::Error| {
        EmitError::Write { path: path.to_path_buf(), source }
    };
    let mut out = BufWriter::new(fs::File::create(path).map_err(to_err)?);
    write_density(&mut out, wf, stride).map_err(to_err)?;
    out.flush().map_err(to_err)
}

/// Outcome of draining a [`SnapshotWriter`].
#[derive(Debug, Default)]
pub struct EmitReport {
    /// Files written successfully, in sequence order.
    pub written: Vec<PathBuf>,
    /// Snapshots that could not be written.
    pub failed: Vec<EmitError>,
}

impl EmitReport {
    /// Return `true` if every snapshot was written.
    pub fn is_ok(&self) -> bool { self.failed.is_empty() }
}

/// Writes snapshots to `<outdir>/<prefix><seq>`, one thread per snapshot.
///
/// Sequence numbers start at 1 and are assigned in the order snapshots are
/// received, so files never collide even when threads finish out of order.
/// Call [`finish`][Self::finish] to wait for all outstanding writes; dropping
/// the writer also waits, but discards the report.
#[derive(Debug)]
pub struct SnapshotWriter {
    outdir: PathBuf,
    prefix: String,
    stride: usize,
    next_seq: usize,
    handles: Vec<(usize, JoinHandle<EmitResult<PathBuf>>)>,
    failed: Vec<EmitError>,
}

impl SnapshotWriter {
    /// Create the writer, along with `outdir` if it doesn't already exist.
    pub fn new<P>(outdir: P, prefix: &str, stride: usize) -> EmitResult<Self>
    where P: AsRef<Path>
    {
        let outdir = outdir.as_ref().to_path_buf();
        fs::create_dir_all(&outdir)
            .map_err(|source| EmitError::OutDir { path: outdir.clone(), source })?;
        Ok(Self {
            outdir,
            prefix: prefix.to_string(),
            stride: stride.max(1),
            next_seq: 1,
            handles: Vec::new(),
            failed: Vec::new(),
        })
    }

    /// Create a writer using the output settings in `params`.
    pub fn from_params(params: &Params) -> EmitResult<Self> {
        Self::new(&params.outdir, &params.snapshot_prefix, params.snapshot_stride)
    }

    pub fn outdir(&self) -> &Path { &self.outdir }

    /// Path of the file holding snapshot number `seq`.
    pub fn path_for(&self, seq: usize) -> PathBuf {
        self.outdir.join(format!("{}{}", self.prefix, seq))
    }

    /// Number of snapshots received so far.
    pub fn emitted(&self) -> usize { self.next_seq - 1 }

    /// Number of writer threads that have not yet finished.
    pub fn in_flight(&self) -> usize {
        self.handles.iter().filter(|(_, h)| !h.is_finished()).count()
    }

    // keep the handle of a started writer, or record why it couldn't start
    fn track(
        &mut self,
        seq: usize,
        spawned: io::Result<JoinHandle<EmitResult<PathBuf>>>,
    ) {
        match spawned {
            Ok(handle) => { self.handles.push((seq, handle)); },
            Err(source) => {
                let err = EmitError::Spawn { seq, source };
                log::warn!("{err}");
                self.failed.push(err);
            },
        }
    }

    fn drain(&mut self) -> EmitReport {
        let mut report = EmitReport {
            written: Vec::new(),
            failed: std::mem::take(&mut self.failed),
        };
        for (seq, handle) in self.handles.drain(..) {
            match handle.join() {
                Ok(Ok(path)) => { report.written.push(path); },
                Ok(Err(err)) => {
                    log::warn!("{err}");
                    report.failed.push(err);
                },
                Err(_) => {
                    log::warn!("writer thread for snapshot {seq} panicked");
                    report.failed.push(EmitError::Panicked(seq));
                },
            }
        }
        report
    }

    /// Wait for every outstanding write to finish.
    pub fn finish(mut self) -> EmitReport {
        let report = self.drain();
        log::info!(
            "wrote {} snapshot(s) to {:?}; {} failed",
            report.written.len(),
            self.outdir,
            report.failed.len(),
        );
        report
    }
}

impl Emitter for SnapshotWriter {
    fn emit(&mut self, wf: Wavefunction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let path = self.path_for(seq);
        let stride = self.stride;
        log::trace!("writing snapshot {seq} to {path:?}");
        let spawned
            = thread::Builder::new()
            .name(format!("snapshot-{seq}"))
            .spawn(move || write_snapshot(&path, &wf, stride).map(|_| path));
        self.track(seq, spawned);
    }
}

impl Drop for SnapshotWriter {
    fn drop(&mut self) {
        if !self.handles.is_empty() { self.drain(); }
    }
}

#[cfg(test)]
mod tests {
    use ndarray as nd;
    use super::*;

    fn ramp(n: usize) -> Wavefunction {
        let f: nd::Array1<f64> = (0..n).map(|k| 0.01 * k as f64).collect();
        let g: nd::Array1<f64> = nd::Array1::from_elem(n, 0.5);
        Wavefunction::from_parts(f, g).unwrap()
    }

    #[test]
    fn density_record_format() {
        let mut out: Vec<u8> = Vec::new();
        write_density(&mut out, &ramp(25), 10).unwrap();
        let text = String::from_utf8(out).unwrap();
        let expected = concat!(
            "       0     0.250000\n",
            "      10     0.260000\n",
            "      20     0.290000\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn stride_of_one_keeps_every_point() {
        let mut out: Vec<u8> = Vec::new();
        write_density(&mut out, &ramp(7), 1).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 7);
    }

    #[test]
    fn writer_numbers_files_from_one() {
        let dir = tempfile::tempdir().unwrap();
        let outdir = dir.path().join("well");
        let mut writer = SnapshotWriter::new(&outdir, "schrodinger", 10).unwrap();
        assert!(outdir.is_dir());
        for _ in 0..3 { writer.emit(ramp(40)); }
        assert_eq!(writer.emitted(), 3);
        let report = writer.finish();
        assert!(report.is_ok());
        assert_eq!(
            report.written,
            vec![
                outdir.join("schrodinger1"),
                outdir.join("schrodinger2"),
                outdir.join("schrodinger3"),
            ],
        );
        let contents = fs::read_to_string(outdir.join("schrodinger2")).unwrap();
        assert_eq!(contents.lines().count(), 4);
        assert_eq!(contents.lines().nth(3), Some("      30     0.340000"));
    }

    #[test]
    fn failed_write_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = SnapshotWriter::new(dir.path(), "snap", 1).unwrap();
        // a directory where the first file should go makes that write fail
        fs::create_dir(writer.path_for(1)).unwrap();
        writer.emit(ramp(4));
        writer.emit(ramp(4));
        let report = writer.finish();
        assert!(!report.is_ok());
        assert_eq!(report.failed.len(), 1);
        assert!(matches!(report.failed[0], EmitError::Write { .. }));
        assert_eq!(report.written, vec![dir.path().join("snap2")]);
    }

    #[test]
    fn in_flight_writers_settle() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = SnapshotWriter::new(dir.path(), "snap", 1).unwrap();
        assert_eq!(writer.outdir(), dir.path());
        assert_eq!(writer.in_flight(), 0);
        for _ in 0..4 { writer.emit(ramp(2000)); }
        assert!(writer.in_flight() <= writer.emitted());
        let mut polls = 0;
        while writer.in_flight() > 0 && polls < 1000 {
            std::thread::sleep(std::time::Duration::from_millis(5));
            polls += 1;
        }
        assert_eq!(writer.in_flight(), 0);
        let report = writer.finish();
        assert_eq!(report.written.len(), 4);
    }

    #[test]
    fn unstarted_writer_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = SnapshotWriter::new(dir.path(), "snap", 1).unwrap();
        writer.emit(ramp(4));
        writer.track(2, Err(io::Error::new(io::ErrorKind::WouldBlock, "no threads")));
        let report = writer.finish();
        assert_eq!(report.written, vec![dir.path().join("snap1")]);
        assert_eq!(report.failed.len(), 1);
        assert!(matches!(report.failed[0], EmitError::Spawn { seq: 2, .. }));
    }

    #[test]
    fn dropping_waits_for_writes() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut writer = SnapshotWriter::new(dir.path(), "snap", 5).unwrap();
            writer.emit(ramp(100));
        }
        let contents = fs::read_to_string(dir.path().join("snap1")).unwrap();
        assert_eq!(contents.lines().count(), 20);
    }
}
