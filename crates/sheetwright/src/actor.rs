//! Async workbook handle backed by an actor task
//!
//! The workbook is owned by an actor task. Handles send commands over a
//! channel and await the reply. Saves run on the blocking pool only for as
//! long as the save takes, so serialization and file IO never stall the
//! executor and idle workbooks hold no thread.

use std::path::PathBuf;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};

use sheetwright_core::{CalendarDate, CalendarDateTime, WorkbookSettings};
use sheetwright_xlsx::PackageOptions;

use crate::error::{Error, Result};
use crate::session::{CellInput, Session};

/// Pending commands per workbook before senders wait
const COMMAND_BUFFER: usize = 64;

enum Command {
    AddWorksheet {
        name: Option<String>,
        reply: oneshot::Sender<Result<u32>>,
    },
    Write {
        sheet: u32,
        row: u32,
        col: u16,
        value: CellInput,
        reply: oneshot::Sender<Result<()>>,
    },
    SetColumnWidth {
        sheet: u32,
        col: u16,
        width: f64,
        reply: oneshot::Sender<Result<()>>,
    },
    SetRowHeight {
        sheet: u32,
        row: u32,
        height: f64,
        reply: oneshot::Sender<Result<()>>,
    },
    WorksheetCount {
        reply: oneshot::Sender<u32>,
    },
    Save {
        path: PathBuf,
        reply: oneshot::Sender<Result<()>>,
    },
    SaveToBuffer {
        reply: oneshot::Sender<Result<Vec<u8>>>,
    },
}

/// A workbook owned by a background actor
///
/// Clones share the same actor; commands are applied one at a time in the
/// order they arrive. The actor stops when the last handle is dropped.
///
/// Must be created from within a Tokio runtime; use
/// [`try_new`](AsyncWorkbook::try_new) when that is not certain.
///
/// ```rust
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> sheetwright::Result<()> {
/// use sheetwright::{AsyncWorkbook, CalendarDate};
///
/// let workbook = AsyncWorkbook::new();
/// let sheet = workbook.add_worksheet().await?;
/// workbook.write_date(sheet, 0, 0, CalendarDate::new(2024, 12, 25)).await?;
///
/// let bytes = workbook.save_to_buffer().await?;
/// assert_eq!(&bytes[..2], b"PK");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AsyncWorkbook {
    tx: mpsc::Sender<Command>,
}

impl AsyncWorkbook {
    /// Start an actor for an empty workbook with default settings
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn new() -> Self {
        Self::with_options(WorkbookSettings::default(), PackageOptions::default())
    }

    /// Start an actor for an empty workbook with the given options
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn with_options(settings: WorkbookSettings, options: PackageOptions) -> Self {
        Self::spawn_on(&Handle::current(), settings, options)
    }

    /// Like [`new`](AsyncWorkbook::new), but fails with
    /// [`Error::NoRuntime`] outside a Tokio runtime
    pub fn try_new() -> Result<Self> {
        Self::try_with_options(WorkbookSettings::default(), PackageOptions::default())
    }

    /// Like [`with_options`](AsyncWorkbook::with_options), but fails with
    /// [`Error::NoRuntime`] outside a Tokio runtime
    pub fn try_with_options(settings: WorkbookSettings, options: PackageOptions) -> Result<Self> {
        let handle = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        Ok(Self::spawn_on(&handle, settings, options))
    }

    fn spawn_on(handle: &Handle, settings: WorkbookSettings, options: PackageOptions) -> Self {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        handle.spawn(run(Session::new(settings, options), rx));
        Self { tx }
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| Error::ActorStopped)?;
        response.await.map_err(|_| Error::ActorStopped)
    }

    async fn write(&self, sheet: u32, row: u32, col: u16, value: CellInput) -> Result<()> {
        self.request(|reply| Command::Write {
            sheet,
            row,
            col,
            value,
            reply,
        })
        .await?
    }

    /// Add a worksheet named `SheetN`
    pub async fn add_worksheet(&self) -> Result<u32> {
        self.request(|reply| Command::AddWorksheet { name: None, reply })
            .await?
    }

    /// Add a worksheet with the given name
    pub async fn add_worksheet_with_name(&self, name: &str) -> Result<u32> {
        let name = Some(name.to_string());
        self.request(|reply| Command::AddWorksheet { name, reply })
            .await?
    }

    /// Number of worksheets
    pub async fn worksheet_count(&self) -> Result<u32> {
        self.request(|reply| Command::WorksheetCount { reply }).await
    }

    pub async fn write_string(&self, sheet: u32, row: u32, col: u16, value: &str) -> Result<()> {
        self.write(sheet, row, col, CellInput::String(value.to_string()))
            .await
    }

    pub async fn write_number(&self, sheet: u32, row: u32, col: u16, value: f64) -> Result<()> {
        self.write(sheet, row, col, CellInput::Number(value)).await
    }

    pub async fn write_integer(&self, sheet: u32, row: u32, col: u16, value: i64) -> Result<()> {
        self.write(sheet, row, col, CellInput::Integer(value)).await
    }

    pub async fn write_boolean(&self, sheet: u32, row: u32, col: u16, value: bool) -> Result<()> {
        self.write(sheet, row, col, CellInput::Boolean(value)).await
    }

    /// Write a date shown as `yyyy-mm-dd`
    pub async fn write_date(
        &self,
        sheet: u32,
        row: u32,
        col: u16,
        date: CalendarDate,
    ) -> Result<()> {
        self.write(sheet, row, col, CellInput::Date(date)).await
    }

    /// Write a date and time shown as `yyyy-mm-dd hh:mm:ss`
    pub async fn write_datetime(
        &self,
        sheet: u32,
        row: u32,
        col: u16,
        datetime: CalendarDateTime,
    ) -> Result<()> {
        self.write(sheet, row, col, CellInput::DateTime(datetime))
            .await
    }

    /// Write a date shown with a custom number format
    pub async fn write_date_with_format(
        &self,
        sheet: u32,
        row: u32,
        col: u16,
        date: CalendarDate,
        format: &str,
    ) -> Result<()> {
        self.write(
            sheet,
            row,
            col,
            CellInput::FormattedDate(date, format.to_string()),
        )
        .await
    }

    /// Set a column width in characters; 0 hides the column
    pub async fn set_column_width(&self, sheet: u32, col: u16, width: f64) -> Result<()> {
        self.request(|reply| Command::SetColumnWidth {
            sheet,
            col,
            width,
            reply,
        })
        .await?
    }

    /// Set a row height in points; 0 hides the row
    pub async fn set_row_height(&self, sheet: u32, row: u32, height: f64) -> Result<()> {
        self.request(|reply| Command::SetRowHeight {
            sheet,
            row,
            height,
            reply,
        })
        .await?
    }

    /// Save to a file, replacing it atomically
    pub async fn save(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        self.request(|reply| Command::Save { path, reply }).await?
    }

    /// Save into a new in-memory buffer
    pub async fn save_to_buffer(&self) -> Result<Vec<u8>> {
        self.request(|reply| Command::SaveToBuffer { reply }).await?
    }
}

async fn run(mut session: Session, mut rx: mpsc::Receiver<Command>) {
    log::trace!("workbook actor started");
    while let Some(command) = rx.recv().await {
        // A dropped reply receiver means the caller gave up; nothing to do.
        match command {
            Command::AddWorksheet { name, reply } => {
                let _ = reply.send(session.add_worksheet(name.as_deref()));
            }
            Command::Write {
                sheet,
                row,
                col,
                value,
                reply,
            } => {
                let _ = reply.send(session.write(sheet, row, col, value));
            }
            Command::SetColumnWidth {
                sheet,
                col,
                width,
                reply,
            } => {
                let _ = reply.send(session.set_column_width(sheet, col, width));
            }
            Command::SetRowHeight {
                sheet,
                row,
                height,
                reply,
            } => {
                let _ = reply.send(session.set_row_height(sheet, row, height));
            }
            Command::WorksheetCount { reply } => {
                let _ = reply.send(session.sheet_count());
            }
            Command::Save { path, reply } => {
                let Some((returned, result)) = offload(session, move |s| s.save(&path)).await
                else {
                    return;
                };
                session = returned;
                let _ = reply.send(result);
            }
            Command::SaveToBuffer { reply } => {
                let Some((returned, result)) = offload(session, Session::save_to_buffer).await
                else {
                    return;
                };
                session = returned;
                let _ = reply.send(result);
            }
        }
    }
    log::trace!("workbook actor stopped");
}

/// Run `f` on the blocking pool and hand the session back
///
/// The actor awaits the result before reading the next command, so commands
/// stay ordered. `None` means the blocking task panicked and took the session
/// with it.
async fn offload<T, F>(mut session: Session, f: F) -> Option<(Session, T)>
where
    T: Send + 'static,
    F: FnOnce(&mut Session) -> T + Send + 'static,
{
    let task = tokio::task::spawn_blocking(move || {
        let result = f(&mut session);
        (session, result)
    });
    match task.await {
        Ok(done) => Some(done),
        Err(err) => {
            log::error!("workbook save task failed: {}", err);
            None
        }
    }
}
