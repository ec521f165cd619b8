//! Terminal shell: stdin/stdout front end for the wizard.
//!
//! Reads one command per line and prints the affected screen. While a field
//! has a pending debounce the loop also waits on its deadline, so inline
//! validation shows up without further input.

pub mod command;
pub mod fields;
pub mod render;

use std::io::Write;

use chrono::Utc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::onboarding::screens;
use crate::onboarding::{PersonalField, PersonalInfoForm, Step, WizardStore};

pub use command::{Command, ParseError};

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

enum Event {
    Input(Option<String>),
    Expired(Vec<PersonalField>),
}

pub struct Shell {
    store: WizardStore,
    form: PersonalInfoForm,
}

impl Shell {
    pub fn new(store: WizardStore, form: PersonalInfoForm) -> Self {
        Self { store, form }
    }

    pub fn store(&self) -> &WizardStore {
        &self.store
    }

    pub fn form(&self) -> &PersonalInfoForm {
        &self.form
    }

    /// Drive the shell until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, mut out: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        writeln!(out, "{}", self.render())?;
        prompt(&mut out)?;

        loop {
            let pending = self.form.has_pending();
            let event = tokio::select! {
                line = lines.next_line() => Event::Input(line?),
                fired = self.form.next_expiry(), if pending => Event::Expired(fired),
            };

            match event {
                Event::Input(None) => break,
                Event::Input(Some(line)) => {
                    let command = match Command::parse(&line) {
                        Ok(Some(command)) => command,
                        Ok(None) => {
                            prompt(&mut out)?;
                            continue;
                        }
                        Err(e) => {
                            writeln!(out, "{e}")?;
                            prompt(&mut out)?;
                            continue;
                        }
                    };
                    debug!(?command, "Shell command");
                    match self.execute(command).await {
                        Flow::Continue(text) => writeln!(out, "{text}")?,
                        Flow::Quit => break,
                    }
                }
                Event::Expired(fired) => {
                    let text = self.apply_expired(&fired);
                    if text.is_empty() {
                        continue;
                    }
                    writeln!(out, "\n{text}")?;
                }
            }
            prompt(&mut out)?;
        }

        writeln!(out, "¡Hasta pronto!")?;
        out.flush()
    }

    /// Run one command against the wizard.
    ///
    /// Debounce timers only live while the personal screen is on display;
    /// leaving it drops them unfired.
    pub async fn execute(&mut self, command: Command) -> Flow {
        let flow = self.dispatch(command).await;
        if !self.personal_screen_visible() && self.form.has_pending() {
            debug!("Dropping pending validations for hidden personal screen");
            self.form.cancel_pending();
        }
        flow
    }

    fn personal_screen_visible(&self) -> bool {
        self.store.show_onboarding()
            && !self.store.show_success_modal()
            && self.store.current_step() == Step::PersonalInfo
    }

    async fn dispatch(&mut self, command: Command) -> Flow {
        match command {
            Command::Quit => return Flow::Quit,
            Command::Help => return Flow::Continue(render::help()),
            Command::Start if !self.store.show_success_modal() => {
                self.store.start_onboarding().await;
                return Flow::Continue(self.render());
            }
            Command::Reset => {
                self.store.reset_data().await;
                self.form.reset();
                return Flow::Continue(self.render());
            }
            _ => {}
        }

        if self.store.show_success_modal() {
            return match command {
                Command::Close => {
                    self.store.handle_success_modal_close().await;
                    self.form.reset();
                    Flow::Continue(self.render())
                }
                Command::Show => Flow::Continue(self.render()),
                _ => Flow::Continue("Escribe 'close' para cerrar la confirmación.".to_string()),
            };
        }

        if !self.store.show_onboarding() {
            return match command {
                Command::Show => Flow::Continue(self.render()),
                _ => Flow::Continue("Escribe 'start' para comenzar.".to_string()),
            };
        }

        let step = self.store.current_step();
        let result = match command {
            Command::Show => Ok(()),
            Command::Set { field, value } => {
                fields::set_field(&mut self.store, &mut self.form, &field, &value).await
            }
            Command::Toggle { field, value } => {
                fields::toggle_field(&mut self.store, &field, &value).await
            }
            Command::Blur { field } => fields::personal_field(step, &field).map(|field| {
                self.form.blur(&self.store.data().personal_info, field);
            }),
            Command::Focus { field } => {
                fields::personal_field(step, &field).map(|field| self.form.focus(field))
            }
            Command::Next => return self.next().await,
            Command::Back => {
                self.store.previous_step().await;
                Ok(())
            }
            Command::Goto(n) => {
                if !self.store.click_step(n - 1).await {
                    return Flow::Continue(format!("El paso {n} aún no está disponible."));
                }
                Ok(())
            }
            Command::Close => {
                self.store.set_show_onboarding(false);
                Ok(())
            }
            Command::Start | Command::Reset | Command::Help | Command::Quit => Ok(()),
        };

        match result {
            Ok(()) => Flow::Continue(self.render()),
            Err(e) => Flow::Continue(e.to_string()),
        }
    }

    /// Continue on a data step, submit on the summary.
    async fn next(&mut self) -> Flow {
        let step = self.store.current_step();
        if step == Step::Summary {
            return match self.store.handle_submit().await {
                Ok(_) => Flow::Continue(self.render()),
                Err(e) => {
                    warn!(error = %e, "Submission failed");
                    Flow::Continue(format!("No pudimos enviar tu aplicación: {e}"))
                }
            };
        }

        if !self.can_go_next(step) {
            return Flow::Continue("Completa los campos requeridos para continuar.".to_string());
        }
        self.store.next_step().await;
        Flow::Continue(self.render())
    }

    fn can_go_next(&self, step: Step) -> bool {
        let profile = self.store.data();
        match step {
            Step::PersonalInfo => self.form.can_go_next(&profile.personal_info),
            _ => screens::can_go_next(step, profile, self.form.today()),
        }
    }

    /// Validate fields whose debounce fired and describe the outcome.
    fn apply_expired(&mut self, fired: &[PersonalField]) -> String {
        let info = &self.store.data().personal_info;
        self.form.apply_expired(info, fired);

        if !self.personal_screen_visible() {
            return String::new();
        }
        fired
            .iter()
            .map(|field| match self.form.error(*field) {
                Some(error) => format!("  {}: ⚠ {error}", field.wire_name()),
                None => format!("  {}: ✓", field.wire_name()),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render(&self) -> String {
        if self.store.show_success_modal() {
            return render::success_modal(&self.store.data().personal_info.email);
        }
        if !self.store.show_onboarding() {
            return render::landing();
        }
        format!(
            "{}\n{}",
            render::header(),
            render::screen(
                self.store.data(),
                &self.form,
                self.store.last_saved_at(),
                self.form.today(),
                Utc::now(),
            )
        )
    }
}

fn prompt<W: Write>(out: &mut W) -> std::io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}
