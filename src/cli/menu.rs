// Interactive menu: the textual front end over the identity and lifecycle services

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use thiserror::Error;

use crate::app_data::AppData;
use crate::errors::{IdentityError, InternalError};
use crate::types::{
    Decision, DetailsUpdate, Identity, NewApplication, OperationContext, Role, VisaApplication,
};

/// Date format accepted at every date prompt
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const INVALID_DATE: &str = "Invalid date format. Please use YYYY-MM-DD.";
const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Input closed mid-session; treated as a normal exit by `Menu::run`
    #[error("Input closed")]
    EndOfInput,
}

/// Parse a `YYYY-MM-DD` date as typed at a prompt
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Print every field of an application as `Label: value`
pub fn write_application(out: &mut impl Write, app: &VisaApplication) -> io::Result<()> {
    fn or_none(value: Option<String>) -> String {
        value.unwrap_or_else(|| "None".to_string())
    }
    let date = |d: Option<NaiveDate>| or_none(d.map(|d| d.format(DATE_FORMAT).to_string()));

    let rows = [
        ("Name", app.name.clone()),
        ("Passport_number", app.passport_number.clone()),
        ("Nationality", app.nationality.clone()),
        ("University", app.university.clone()),
        ("Visa_type", app.visa_type.clone()),
        ("Interview_date", date(app.interview_date)),
        ("Interview_location", or_none(app.interview_location.clone())),
        ("Interview_status", app.interview_status.to_string()),
        ("Visa_status", app.visa_status.to_string()),
        ("Visa_expiry_date", date(app.visa_expiry_date)),
        ("Renew_status", app.renew_status.to_string()),
        ("Details_updated", if app.details_updated { "True" } else { "False" }.to_string()),
    ];

    for (label, value) in rows {
        writeln!(out, "{}: {}", label, value)?;
    }
    Ok(())
}

/// Menu session over any line-oriented input and output
pub struct Menu<'a, R, W> {
    app_data: &'a AppData,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(app_data: &'a AppData, input: R, output: W) -> Self {
        Self {
            app_data,
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the top-level menu until Exit is chosen or input ends
    pub fn run(&mut self) -> Result<(), MenuError> {
        match self.top_menu() {
            Err(MenuError::EndOfInput) => {
                tracing::debug!("Input closed, leaving menu");
                Ok(())
            }
            other => other,
        }
    }

    fn top_menu(&mut self) -> Result<(), MenuError> {
        loop {
            self.say("\n--- International Student Visa Facilitator ---")?;
            self.say("1. Register")?;
            self.say("2. Login")?;
            self.say("3. Exit")?;

            match self.prompt("Choose an option: ")?.trim() {
                "1" => self.register()?,
                "2" => self.login()?,
                "3" => {
                    self.say("Exiting...")?;
                    return Ok(());
                }
                _ => self.say(INVALID_CHOICE)?,
            }
        }
    }

    fn user_menu(&mut self, identity: &Identity) -> Result<(), MenuError> {
        loop {
            self.say("\n--- User Menu ---")?;
            self.say("1. Create Visa Application")?;
            self.say("2. View Application")?;
            self.say("3. Update User Details")?;
            self.say("4. Logout")?;

            let ctx = OperationContext::for_menu(Some(identity));
            match self.prompt("Choose an option: ")?.trim() {
                "1" => self.create_application(&ctx)?,
                "2" => self.view_application(&ctx)?,
                "3" => self.update_details(&ctx)?,
                "4" => {
                    self.say("Logging out...")?;
                    return Ok(());
                }
                _ => self.say(INVALID_CHOICE)?,
            }
        }
    }

    fn admin_menu(&mut self, identity: &Identity) -> Result<(), MenuError> {
        loop {
            self.say("\n--- Admin Menu ---")?;
            self.say("1. Create Visa Application")?;
            self.say("2. View Application")?;
            self.say("3. Assign Interview")?;
            self.say("4. Update Interview Status")?;
            self.say("5. Approve/Reject Visa")?;
            self.say("6. Renew Visa")?;
            self.say("7. Suspend Visa")?;
            self.say("8. Unsuspend Visa")?;
            self.say("9. Logout")?;

            let ctx = OperationContext::for_menu(Some(identity));
            match self.prompt("Choose an option: ")?.trim() {
                "1" => self.create_application(&ctx)?,
                "2" => self.view_application(&ctx)?,
                "3" => self.assign_interview(&ctx)?,
                "4" => self.update_interview_status(&ctx)?,
                "5" => self.decide(&ctx)?,
                "6" => self.renew(&ctx)?,
                "7" => self.suspend(&ctx)?,
                "8" => self.unsuspend(&ctx)?,
                "9" => {
                    self.say("Logging out...")?;
                    return Ok(());
                }
                _ => self.say(INVALID_CHOICE)?,
            }
        }
    }

    fn register(&mut self) -> Result<(), MenuError> {
        let username = self.prompt("Enter username: ")?;
        let password = self.prompt("Enter password: ")?;
        let role = self.prompt("Enter user type (User/Admin): ")?;

        let Ok(role) = role.parse::<Role>() else {
            return self.say("Invalid user type. Please enter User or Admin.");
        };

        let ctx = OperationContext::for_menu(None);
        let result = self
            .app_data
            .identity_service
            .register(&ctx, &username, &password, role);
        self.report(result, |_| "Registration successful! Please login.".to_string())
    }

    fn login(&mut self) -> Result<(), MenuError> {
        let username = self.prompt("Enter username: ")?;
        let password = self.prompt("Enter password: ")?;
        let role = self.prompt("Enter user type (User/Admin): ")?;

        let ctx = OperationContext::for_menu(None);
        // An unknown role can never match a stored credential
        let result = match role.parse::<Role>() {
            Ok(role) => self
                .app_data
                .identity_service
                .authenticate(&ctx, &username, &password, role),
            Err(_) => Err(IdentityError::InvalidCredentials.into()),
        };

        match result {
            Ok(identity) => {
                self.say(format!("Logged in as {} ({})", identity.username, identity.role))?;
                match identity.role {
                    Role::User => self.user_menu(&identity),
                    Role::Admin => self.admin_menu(&identity),
                }
            }
            Err(error) => self.report_error(error),
        }
    }

    fn create_application(&mut self, ctx: &OperationContext) -> Result<(), MenuError> {
        let submission = NewApplication {
            name: self.prompt("Enter name: ")?,
            passport_number: self.prompt("Enter passport number (10 digits): ")?,
            nationality: self.prompt("Enter nationality: ")?,
            university: self.prompt("Enter university: ")?,
            visa_type: self.prompt("Enter visa type (Student/Work): ")?,
        };

        let result = self.app_data.lifecycle_service.create(ctx, submission);
        self.report(result, |id| {
            format!("Application created successfully! Application ID: {}", id)
        })
    }

    fn view_application(&mut self, ctx: &OperationContext) -> Result<(), MenuError> {
        let id = self.prompt("Enter application ID: ")?;

        match self.app_data.lifecycle_service.view(ctx, &id) {
            Ok(application) => Ok(write_application(&mut self.output, &application)?),
            Err(error) => self.report_error(error),
        }
    }

    fn update_details(&mut self, ctx: &OperationContext) -> Result<(), MenuError> {
        let id = self.prompt("Enter application ID: ")?;
        let update = DetailsUpdate {
            name: self.prompt("Enter name: ")?,
            passport_number: self.prompt("Enter passport number (10 digits): ")?,
            nationality: self.prompt("Enter nationality: ")?,
            university: self.prompt("Enter university: ")?,
        };

        let result = self.app_data.lifecycle_service.update_details(ctx, &id, update);
        self.report(result, |_| "Details updated successfully!".to_string())
    }

    fn assign_interview(&mut self, ctx: &OperationContext) -> Result<(), MenuError> {
        let id = self.prompt("Enter application ID: ")?;
        let date = self.prompt("Enter interview date (YYYY-MM-DD): ")?;
        let location = self.prompt("Enter interview location: ")?;

        let Some(date) = parse_date(&date) else {
            return self.say(INVALID_DATE);
        };

        let result = self
            .app_data
            .lifecycle_service
            .assign_interview(ctx, &id, date, &location);
        self.report(result, |_| "Interview assigned successfully!".to_string())
    }

    fn update_interview_status(&mut self, ctx: &OperationContext) -> Result<(), MenuError> {
        let id = self.prompt("Enter application ID: ")?;
        let new_status = self.prompt("Enter new status (Completed/Pending): ")?;

        let result = self
            .app_data
            .lifecycle_service
            .update_interview_status(ctx, &id, &new_status);
        self.report(result, |_| "Interview status updated successfully!".to_string())
    }

    fn decide(&mut self, ctx: &OperationContext) -> Result<(), MenuError> {
        let id = self.prompt("Enter application ID: ")?;
        let decision = self.prompt("Enter decision (Approve/Reject): ")?;
        let expiry = self.prompt("Enter expiry date (YYYY-MM-DD): ")?;

        let Some(expiry) = parse_date(&expiry) else {
            return self.say(INVALID_DATE);
        };
        let Some(decision) = Decision::parse(&decision, expiry) else {
            return self.say("Invalid decision. Please enter Approve or Reject.");
        };

        let result = self.app_data.lifecycle_service.decide(ctx, &id, decision);
        self.report(result, |_| match decision {
            Decision::Approve { .. } => "Visa approved successfully!".to_string(),
            Decision::Reject => "Visa rejected.".to_string(),
        })
    }

    fn renew(&mut self, ctx: &OperationContext) -> Result<(), MenuError> {
        let id = self.prompt("Enter application ID: ")?;
        let new_expiry = self.prompt("Enter new expiry date (YYYY-MM-DD): ")?;

        let Some(new_expiry) = parse_date(&new_expiry) else {
            return self.say(INVALID_DATE);
        };

        let result = self.app_data.lifecycle_service.renew(ctx, &id, new_expiry);
        self.report(result, |_| "Visa renewed successfully!".to_string())
    }

    fn suspend(&mut self, ctx: &OperationContext) -> Result<(), MenuError> {
        let id = self.prompt("Enter application ID: ")?;
        let result = self.app_data.lifecycle_service.suspend(ctx, &id);
        self.report(result, |_| "Visa suspended successfully!".to_string())
    }

    fn unsuspend(&mut self, ctx: &OperationContext) -> Result<(), MenuError> {
        let id = self.prompt("Enter application ID: ")?;
        let result = self.app_data.lifecycle_service.unsuspend(ctx, &id);
        self.report(result, |_| "Visa unsuspended successfully!".to_string())
    }

    /// Print the success message or the error; the session continues either way
    fn report<T>(
        &mut self,
        result: Result<T, InternalError>,
        success: impl FnOnce(T) -> String,
    ) -> Result<(), MenuError> {
        match result {
            Ok(value) => {
                let message = success(value);
                self.say(message)
            }
            Err(error) => self.report_error(error),
        }
    }

    fn report_error(&mut self, error: InternalError) -> Result<(), MenuError> {
        if error.is_user_facing() {
            return self.say(error);
        }
        tracing::error!("Operation failed: {}", error);
        self.say(format!("Error: {}", error))
    }

    fn say(&mut self, message: impl Display) -> Result<(), MenuError> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Show a prompt and read one line without its line terminator
    fn prompt(&mut self, label: &str) -> Result<String, MenuError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(MenuError::EndOfInput);
        }
        let content_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(content_len);
        Ok(line)
    }
}
