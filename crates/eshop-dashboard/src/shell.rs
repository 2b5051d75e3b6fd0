//! Interactive line-based front end
//!
//! Each line typed at the prompt is parsed with clap into a [`ShellCommand`] and applied to
//! the [`Dashboard`]. Form fields and the delete confirmation are read through the same
//! [`LineInput`], so the whole session runs on one terminal.

use crate::dashboard::Dashboard;
use crate::view::{CategoryList, Screen};
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use eshop_client::ShopApi;
use eshop_core::{CategoryId, ProductId, SortKey};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

const PROMPT: &str = "eshop> ";

/// One line of shell input
#[derive(Debug, Parser)]
#[command(
    name = "eshop",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    /// Command to run
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands accepted at the prompt
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ShellCommand {
    /// Re-fetch products and categories
    #[command(alias = "ls")]
    List,
    /// Go to the next page
    Next,
    /// Go to the previous page
    #[command(alias = "previous")]
    Prev,
    /// Jump to a page
    Page {
        /// Page number, starting at 1
        number: u32,
    },
    /// Search product names and descriptions; no term clears the search
    Search {
        /// Rest of the line, sent as typed
        term: Option<String>,
    },
    /// Filter by category; no id shows all categories
    Category {
        /// Category id, see `categories`
        id: Option<CategoryId>,
    },
    /// Change the ordering
    Sort {
        /// One of -created_at, created_at, price, -price, name, -name
        #[arg(allow_hyphen_values = true)]
        key: SortKey,
    },
    /// List categories
    Categories,
    /// Log in
    Login,
    /// Create an account
    Register,
    /// Forget the login token
    Logout,
    /// Create a product
    Add,
    /// Edit a product on the current page
    Edit {
        /// Product id
        id: ProductId,
    },
    /// Delete a product after confirming
    Delete {
        /// Product id
        id: ProductId,
    },
    /// Hide a banner message
    Dismiss {
        /// Which message to hide
        #[arg(value_enum)]
        slot: BannerSlot,
    },
    /// Show this help
    Help,
    /// Leave the dashboard
    #[command(alias = "exit")]
    Quit,
}

/// Banner message slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BannerSlot {
    /// The error message
    Error,
    /// The success message
    Success,
}

impl ShellLine {
    /// Parse one line of input
    ///
    /// Arguments are split on whitespace, except for `search`, whose term is the rest of the
    /// line with only the outer whitespace removed.
    ///
    /// # Errors
    ///
    /// Returns the clap error, which renders as a usage message.
    pub fn parse_line(line: &str) -> std::result::Result<Self, clap::Error> {
        let line = line.trim();
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        if head == "search" {
            let term = rest.trim();
            return Ok(Self {
                command: ShellCommand::Search {
                    term: (!term.is_empty()).then(|| term.to_string()),
                },
            });
        }

        Self::try_parse_from(line.split_whitespace())
    }
}

/// Source of typed lines: the prompt, form fields and confirmations
pub trait LineInput {
    /// Read one line after showing `prompt`, pre-filled with `initial`
    ///
    /// `Ok(None)` means the user gave up (Ctrl-C or end of input).
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn read_line(&mut self, prompt: &str, initial: &str) -> Result<Option<String>>;

    /// Record a command line in the history
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be updated.
    fn remember(&mut self, _line: &str) -> Result<()> {
        Ok(())
    }
}

impl LineInput for DefaultEditor {
    fn read_line(&mut self, prompt: &str, initial: &str) -> Result<Option<String>> {
        match self.readline_with_initial(prompt, (initial, "")) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remember(&mut self, line: &str) -> Result<()> {
        self.add_history_entry(line)?;
        Ok(())
    }
}

/// What the loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Redraw the screen
    Render,
    /// Output was already printed; prompt again
    Quiet,
    /// Leave the loop
    Quit,
}

/// Read-eval-render loop around a [`Dashboard`]
pub struct Shell<A, I = DefaultEditor> {
    dashboard: Dashboard<A>,
    input: I,
}

impl<A, I> std::fmt::Debug for Shell<A, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell").finish_non_exhaustive()
    }
}

impl<A: ShopApi> Shell<A> {
    /// Attach a terminal line editor to `dashboard`
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up.
    pub fn new(dashboard: Dashboard<A>) -> Result<Self> {
        let editor = DefaultEditor::new()?;
        Ok(Self::with_input(dashboard, editor))
    }
}

impl<A: ShopApi, I: LineInput> Shell<A, I> {
    /// Drive `dashboard` from any line source
    #[must_use]
    pub const fn with_input(dashboard: Dashboard<A>, input: I) -> Self {
        Self { dashboard, input }
    }

    /// The dashboard being driven
    #[must_use]
    pub const fn dashboard(&self) -> &Dashboard<A> {
        &self.dashboard
    }

    /// The line source
    #[must_use]
    pub const fn input(&self) -> &I {
        &self.input
    }

    /// Fetch the first page, then process commands until `quit`, Ctrl-C or end of input
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    #[allow(clippy::future_not_send)]
    pub async fn run(&mut self) -> Result<()> {
        self.dashboard.refresh().await;
        self.render();

        while let Some(line) = self.input.read_line(PROMPT, "")? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.input.remember(line)?;

            let command = match ShellLine::parse_line(line) {
                Ok(parsed) => parsed.command,
                Err(e) => {
                    println!("{e}");
                    continue;
                }
            };

            debug!(?command, "Running shell command");
            match self.execute(command).await? {
                Flow::Render => self.render(),
                Flow::Quiet => {}
                Flow::Quit => break,
            }
        }

        Ok(())
    }

    fn render(&self) {
        println!();
        print!("{}", Screen::new(&self.dashboard));
    }

    /// Apply one command, reading form fields and confirmations from the line source
    ///
    /// # Errors
    ///
    /// Returns an error if reading a form field fails.
    #[allow(clippy::future_not_send)]
    pub async fn execute(&mut self, command: ShellCommand) -> Result<Flow> {
        match command {
            ShellCommand::List => self.dashboard.refresh().await,
            ShellCommand::Next => self.dashboard.next_page().await,
            ShellCommand::Prev => self.dashboard.previous_page().await,
            ShellCommand::Page { number } => self.dashboard.go_to_page(number).await,
            ShellCommand::Search { term } => self.dashboard.set_search(term).await,
            ShellCommand::Category { id } => self.dashboard.set_category(id).await,
            ShellCommand::Sort { key } => self.dashboard.set_sort(key).await,
            ShellCommand::Categories => {
                print!("{}", CategoryList::new(&self.dashboard));
                return Ok(Flow::Quiet);
            }
            ShellCommand::Login => self.authenticate(false).await?,
            ShellCommand::Register => self.authenticate(true).await?,
            ShellCommand::Logout => self.dashboard.logout(),
            ShellCommand::Add => {
                if self.dashboard.session().is_authenticated() {
                    self.dashboard.open_create_product();
                    self.edit_product().await?;
                } else {
                    self.dashboard.submit_product().await;
                }
            }
            ShellCommand::Edit { id } => {
                if !self.dashboard.session().is_authenticated() {
                    self.dashboard.submit_product().await;
                } else if self.dashboard.open_edit_product(id) {
                    self.edit_product().await?;
                } else {
                    println!("Product #{id} is not on this page.");
                    return Ok(Flow::Quiet);
                }
            }
            ShellCommand::Delete { id } => {
                let input = &mut self.input;
                let mut confirm = |prompt: &str| ask_yes_no(input, prompt);
                self.dashboard.delete_product(id, &mut confirm).await;
            }
            ShellCommand::Dismiss { slot } => match slot {
                BannerSlot::Error => self.dashboard.dismiss_error(),
                BannerSlot::Success => self.dashboard.dismiss_success(),
            },
            ShellCommand::Help => {
                println!("{}", ShellLine::command().render_long_help());
                return Ok(Flow::Quiet);
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Render)
    }

    #[allow(clippy::future_not_send)]
    async fn authenticate(&mut self, register: bool) -> Result<()> {
        self.dashboard.open_auth_modal();
        if register {
            self.dashboard.toggle_auth_mode();
        }

        let filled = self.fill_auth_form(register)?;
        if filled {
            self.dashboard.submit_auth().await;
        }
        self.dashboard.close_auth_modal();
        Ok(())
    }

    fn fill_auth_form(&mut self, register: bool) -> Result<bool> {
        let input = &mut self.input;
        let form = self.dashboard.auth_form_mut();

        let Some(username) = ask(input, "Username", &form.username)? else {
            return Ok(false);
        };
        form.username = username;

        if register {
            let Some(email) = ask(input, "Email", &form.email)? else {
                return Ok(false);
            };
            form.email = email;
        }

        let Some(password) = ask(input, "Password", "")? else {
            return Ok(false);
        };
        form.password = password;

        if register {
            let Some(password2) = ask(input, "Confirm password", "")? else {
                return Ok(false);
            };
            form.password2 = password2;
        }

        Ok(true)
    }

    #[allow(clippy::future_not_send)]
    async fn edit_product(&mut self) -> Result<()> {
        let filled = self.fill_product_form()?;
        if filled {
            self.dashboard.submit_product().await;
        }
        self.dashboard.close_product_modal();
        Ok(())
    }

    fn fill_product_form(&mut self) -> Result<bool> {
        let input = &mut self.input;
        let form = self.dashboard.product_form_mut();

        let fields: [(&str, &mut String); 5] = [
            ("Name", &mut form.name),
            ("Description", &mut form.description),
            ("Price", &mut form.price),
            ("Stock quantity", &mut form.stock_quantity),
            ("Category id", &mut form.category),
        ];

        for (label, value) in fields {
            match ask(input, label, value.as_str())? {
                Some(answer) => *value = answer,
                None => return Ok(false),
            }
        }
        Ok(true)
    }
}

/// Prompt for one field, pre-filled with `initial`
///
/// Ctrl-C or end of input cancels the form and yields `None`.
fn ask(input: &mut impl LineInput, label: &str, initial: &str) -> Result<Option<String>> {
    let answer = input.read_line(&format!("{label}: "), initial)?;
    Ok(answer.map(|a| a.trim().to_string()))
}

fn ask_yes_no(input: &mut impl LineInput, prompt: &str) -> bool {
    input
        .read_line(&format!("{prompt} [y/N] "), "")
        .ok()
        .flatten()
        .is_some_and(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
