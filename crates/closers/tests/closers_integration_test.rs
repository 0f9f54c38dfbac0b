//! Integration tests for aggregated closing

use ioclose::{close_all, closer_fn, Closer, Closers, Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use tempfile::tempdir;

type Output = Rc<RefCell<Vec<String>>>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Writes its name on close
struct PrintOnClose {
    name: &'static str,
    out: Output,
}

impl Closer for PrintOnClose {
    fn close(&mut self) -> Result<()> {
        self.out.borrow_mut().push(self.name.to_string());
        Ok(())
    }
}

/// Writes its name on close, then fails with it
struct ErrorOnClose {
    name: &'static str,
    out: Output,
}

impl Closer for ErrorOnClose {
    fn close(&mut self) -> Result<()> {
        self.out.borrow_mut().push(self.name.to_string());
        Err(Error::close("", self.name))
    }
}

fn print_on_close(name: &'static str, out: &Output) -> PrintOnClose {
    PrintOnClose {
        name,
        out: Rc::clone(out),
    }
}

fn error_on_close(name: &'static str, out: &Output) -> ErrorOnClose {
    ErrorOnClose {
        name,
        out: Rc::clone(out),
    }
}

fn release_four_resources(out: &Output) -> Option<Error> {
    let mut err = None;

    let mut all = Closers::new();
    all.push(print_on_close("closer1", out));
    all.push(error_on_close("closer2", out));
    all.push(print_on_close("closer3", out));
    let printer = Rc::clone(out);
    all.push_fn(move || {
        printer.borrow_mut().push("closer4".to_string());
        Ok(())
    });
    all.close_deferred(&mut err);

    err
}

#[test]
fn test_close_deferred_scenario() {
    init_tracing();
    let out = Output::default();

    let err = release_four_resources(&out);

    assert_eq!(
        *out.borrow(),
        ["closer4", "closer3", "closer2", "closer1"]
    );
    assert_eq!(err.map(|e| e.to_string()).as_deref(), Some("closer2"));
}

#[test]
fn test_close_all_scenario() {
    init_tracing();
    let out = Output::default();

    let result = close_all([
        Box::new(print_on_close("c1", &out)) as Box<dyn Closer>,
        Box::new(error_on_close("c2", &out)),
        Box::new(print_on_close("c3", &out)),
    ]);

    assert_eq!(result.unwrap_err().to_string(), "c2");
    assert_eq!(*out.borrow(), ["c1", "c2", "c3"]);
}

#[test]
fn test_heterogeneous_append_with_absent_entries() {
    init_tracing();
    let out = Output::default();
    let missing: Option<Box<dyn Closer>> = None;

    let mut all = Closers::new();
    all.append([
        Some(Box::new(print_on_close("stmt", &out)) as Box<dyn Closer>),
        missing,
        Some(Box::new(closer_fn({
            let out = Rc::clone(&out);
            move || {
                out.borrow_mut().push("conn".to_string());
                Ok(())
            }
        })) as Box<dyn Closer>),
    ]);

    assert_eq!(all.len(), 2);
    all.close().unwrap();
    assert_eq!(*out.borrow(), ["conn", "stmt"]);
}

#[test]
fn test_pending_closers_run_on_panic() {
    init_tracing();
    let out = Output::default();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut all = Closers::new();
        all.push(print_on_close("outer", &out));
        all.push(error_on_close("inner", &out));
        panic!("Simulated error");
    }));

    assert!(result.is_err());
    assert_eq!(*out.borrow(), ["inner", "outer"]);
}

fn write_report(dir: &std::path::Path) -> Result<usize> {
    let mut all = Closers::new();

    let result = (|| -> Result<usize> {
        let mut summary = BufWriter::new(File::create(dir.join("summary.txt"))?);
        let mut details = BufWriter::new(File::create(dir.join("details.txt"))?);
        summary.write_all(b"2 entries\n")?;
        details.write_all(b"alpha\nbeta\n")?;
        all.push(summary);
        all.push(details);
        Ok(2)
    })();

    all.finish(result)
}

#[test]
fn test_finish_flushes_buffered_files() {
    init_tracing();
    let temp_dir = tempdir().unwrap();

    assert_eq!(write_report(temp_dir.path()).unwrap(), 2);

    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("summary.txt")).unwrap(),
        "2 entries\n"
    );
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("details.txt")).unwrap(),
        "alpha\nbeta\n"
    );
}

#[test]
fn test_finish_keeps_body_error() {
    init_tracing();
    let temp_dir = tempdir().unwrap();
    let missing_dir = temp_dir.path().join("does-not-exist");

    let err = write_report(&missing_dir).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_anyhow_errors_from_close_functions() {
    init_tracing();
    let mut all = Closers::new();
    all.push_fn(|| Err(anyhow::anyhow!("pool already drained").into()));

    let err = all.close().unwrap_err();
    assert_eq!(err.to_string(), "internal error: pool already drained");
}
