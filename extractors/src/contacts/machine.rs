use super::patterns::{find_email, find_phone};
use crate::text::{is_blank, is_conjunction};
use shared_types::ContactRecord;

/// Whether a contact is currently being collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactState {
    NoActive,
    Active(ContactRecord),
}

/// What a line of the contacts region means to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent<'a> {
    /// The line's first PERSON entity.
    PersonFound { name: &'a str, line: &'a str },
    BlankLine,
    ContentLine(&'a str),
}

/// Events for one line, in the order they are fed.
///
/// A PERSON line never counts as a content line. A blank line still closes
/// the record even if the annotator reported a person on it.
pub fn line_events<'a>(
    line: &'a str,
    person: Option<&'a str>,
) -> impl Iterator<Item = LineEvent<'a>> {
    let person_event = person.map(|name| LineEvent::PersonFound { name, line });
    let rest = if is_blank(line) {
        Some(LineEvent::BlankLine)
    } else if person.is_none() {
        Some(LineEvent::ContentLine(line))
    } else {
        None
    };

    [person_event, rest].into_iter().flatten()
}

/// Collects contact records from a stream of line events.
///
/// Transition table:
///
/// | state     | person_found           | blank_line        | content_line     |
/// |-----------|------------------------|-------------------|------------------|
/// | NoActive  | start -> Active        | -> NoActive       | ignore           |
/// | Active    | flush, start -> Active | flush -> NoActive | absorb -> Active |
///
/// Every record leaves the machine exactly once, either through a flush or
/// through [`ContactMachine::finish`].
#[derive(Debug)]
pub struct ContactMachine {
    state: ContactState,
    finished: Vec<ContactRecord>,
    capture_same_line_fields: bool,
}

impl ContactMachine {
    pub fn new(capture_same_line_fields: bool) -> Self {
        Self {
            state: ContactState::NoActive,
            finished: Vec::new(),
            capture_same_line_fields,
        }
    }

    pub fn state(&self) -> &ContactState {
        &self.state
    }

    pub fn finished(&self) -> &[ContactRecord] {
        &self.finished
    }

    pub fn feed(&mut self, event: LineEvent<'_>) {
        let state = std::mem::replace(&mut self.state, ContactState::NoActive);

        self.state = match (state, event) {
            (ContactState::NoActive, LineEvent::PersonFound { name, line }) => {
                ContactState::Active(self.start(name, line))
            }
            (ContactState::Active(current), LineEvent::PersonFound { name, line }) => {
                self.finished.push(current);
                ContactState::Active(self.start(name, line))
            }
            (ContactState::NoActive, LineEvent::BlankLine) => ContactState::NoActive,
            (ContactState::Active(current), LineEvent::BlankLine) => {
                self.finished.push(current);
                ContactState::NoActive
            }
            (ContactState::NoActive, LineEvent::ContentLine(_)) => ContactState::NoActive,
            (ContactState::Active(mut current), LineEvent::ContentLine(line)) => {
                absorb_line(&mut current, line);
                ContactState::Active(current)
            }
        };
    }

    /// Flush any open record and return all records in order.
    pub fn finish(mut self) -> Vec<ContactRecord> {
        if let ContactState::Active(current) =
            std::mem::replace(&mut self.state, ContactState::NoActive)
        {
            self.finished.push(current);
        }
        self.finished
    }

    fn start(&self, name: &str, line: &str) -> ContactRecord {
        let mut record = ContactRecord::new(name);
        if self.capture_same_line_fields {
            capture_fields(&mut record, line);
        }
        record
    }
}

/// Copy the first phone number and first email address on the line into the
/// record. Returns whether either was found.
fn capture_fields(record: &mut ContactRecord, line: &str) -> bool {
    let phone = find_phone(line);
    let email = find_email(line);

    if let Some(phone) = phone {
        record.phone = Some(phone.to_string());
    }
    if let Some(email) = email {
        record.email = Some(email.to_string());
    }

    phone.is_some() || email.is_some()
}

fn absorb_line(record: &mut ContactRecord, line: &str) {
    if capture_fields(record, line) {
        return;
    }

    let trimmed = line.trim();
    if trimmed.is_empty() || is_conjunction(trimmed) || trimmed == record.name {
        return;
    }
    record.other_information.push(trimmed.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_name(machine: &ContactMachine) -> Option<&str> {
        match machine.state() {
            ContactState::Active(record) => Some(record.name.as_str()),
            ContactState::NoActive => None,
        }
    }

    #[test]
    fn test_line_events() {
        let events: Vec<_> = line_events("John Smith", Some("John Smith")).collect();
        assert_eq!(
            events,
            vec![LineEvent::PersonFound {
                name: "John Smith",
                line: "John Smith"
            }]
        );

        let events: Vec<_> = line_events("   ", None).collect();
        assert_eq!(events, vec![LineEvent::BlankLine]);

        let events: Vec<_> = line_events("CEO", None).collect();
        assert_eq!(events, vec![LineEvent::ContentLine("CEO")]);
    }

    #[test]
    fn test_person_found_flushes_active_record() {
        let mut machine = ContactMachine::new(false);
        machine.feed(LineEvent::PersonFound {
            name: "John Smith",
            line: "John Smith",
        });
        machine.feed(LineEvent::ContentLine("CEO"));
        assert!(machine.finished().is_empty());

        machine.feed(LineEvent::PersonFound {
            name: "Jane Doe",
            line: "Jane Doe",
        });
        assert_eq!(machine.finished().len(), 1);
        assert_eq!(machine.finished()[0].name, "John Smith");
        assert_eq!(active_name(&machine), Some("Jane Doe"));
    }

    #[test]
    fn test_blank_line_flushes_and_deactivates() {
        let mut machine = ContactMachine::new(false);
        machine.feed(LineEvent::PersonFound {
            name: "John Smith",
            line: "John Smith",
        });
        machine.feed(LineEvent::BlankLine);
        assert_eq!(machine.finished().len(), 1);
        assert_eq!(active_name(&machine), None);

        // A second blank line must not flush anything again
        machine.feed(LineEvent::BlankLine);
        assert_eq!(machine.finish().len(), 1);
    }

    #[test]
    fn test_content_without_active_contact_is_ignored() {
        let mut machine = ContactMachine::new(false);
        machine.feed(LineEvent::ContentLine("Media Relations"));
        machine.feed(LineEvent::ContentLine("press@example.com"));
        assert_eq!(machine.state(), &ContactState::NoActive);
        assert!(machine.finish().is_empty());
    }

    #[test]
    fn test_content_line_routing() {
        let mut machine = ContactMachine::new(false);
        machine.feed(LineEvent::PersonFound {
            name: "John Smith",
            line: "John Smith",
        });
        machine.feed(LineEvent::ContentLine("  Chief Executive Officer  "));
        machine.feed(LineEvent::ContentLine("or"));
        machine.feed(LineEvent::ContentLine("John Smith"));
        machine.feed(LineEvent::ContentLine("+1 555-123-4567"));
        machine.feed(LineEvent::ContentLine("Alternatively"));
        machine.feed(LineEvent::ContentLine("john@example.com"));

        let contacts = machine.finish();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].phone.as_deref(), Some("+1 555-123-4567"));
        assert_eq!(contacts[0].email.as_deref(), Some("john@example.com"));
        assert_eq!(contacts[0].other_information, vec!["Chief Executive Officer"]);
    }

    #[test]
    fn test_later_match_overwrites_field() {
        let mut machine = ContactMachine::new(false);
        machine.feed(LineEvent::PersonFound {
            name: "John Smith",
            line: "John Smith",
        });
        machine.feed(LineEvent::ContentLine("Office: 555-123-4567"));
        machine.feed(LineEvent::ContentLine("Mobile: 555-987-6543"));

        let contacts = machine.finish();
        assert_eq!(contacts[0].phone.as_deref(), Some("555-987-6543"));
        assert!(contacts[0].other_information.is_empty());
    }

    #[test]
    fn test_same_line_fields_dropped_by_default() {
        let line = "John Smith, 555-123-4567, john@example.com";

        let mut machine = ContactMachine::new(false);
        machine.feed(LineEvent::PersonFound {
            name: "John Smith",
            line,
        });
        let contacts = machine.finish();
        assert_eq!(contacts[0].phone, None);
        assert_eq!(contacts[0].email, None);
        assert!(contacts[0].other_information.is_empty());

        let mut machine = ContactMachine::new(true);
        machine.feed(LineEvent::PersonFound {
            name: "John Smith",
            line,
        });
        let contacts = machine.finish();
        assert_eq!(contacts[0].phone.as_deref(), Some("555-123-4567"));
        assert_eq!(contacts[0].email.as_deref(), Some("john@example.com"));
        assert!(contacts[0].other_information.is_empty());
    }
}
