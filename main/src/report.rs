/*
 * Copyright 2024 Fluence Labs Limited
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use std::io;
use std::io::Write;

use rst_config::Profile;
use rst_config::ToggleAction;
use rst_shared::Toggle;

/// A toggle together with the words used to report on it.
pub(crate) struct Feature<'toggle, T> {
    toggle: &'toggle T,
    /// Used in "Enabling ..." lines and status errors.
    action_name: &'static str,
    /// Used in "... is ENABLED." lines.
    status_name: &'static str,
    /// Printed instead of performing an action on an unavailable feature.
    unavailable_hint: Option<&'static str>,
}

impl<'toggle, T: Toggle> Feature<'toggle, T> {
    pub(crate) fn new(
        toggle: &'toggle T,
        action_name: &'static str,
        status_name: &'static str,
        unavailable_hint: Option<&'static str>,
    ) -> Self {
        Self {
            toggle,
            action_name,
            status_name,
            unavailable_hint,
        }
    }
}

/// Performs the action and reports the outcome, a failure is reported
/// but doesn't stop the caller from applying the other features.
pub(crate) fn apply<T: Toggle>(
    out: &mut impl Write,
    feature: &Feature<'_, T>,
    action: ToggleAction,
) -> io::Result<()> {
    let (verb, enable) = match action {
        ToggleAction::Enable => ("Enabling", true),
        ToggleAction::Disable => ("Disabling", false),
        ToggleAction::Keep => return Ok(()),
    };

    if !feature.toggle.available() {
        return match feature.unavailable_hint {
            Some(hint) => writeln!(out, "{hint}"),
            None => Ok(()),
        };
    }

    write!(out, "{verb} {}:   ", feature.action_name)?;
    let result = if enable {
        feature.toggle.enable()
    } else {
        feature.toggle.disable()
    };

    match result {
        Ok(()) => writeln!(out, "SUCCESS"),
        Err(error) => {
            tracing::warn!("{verb} {} failed: {error:?}", feature.action_name);
            writeln!(out, "oops: {error}")
        }
    }
}

/// Prints the current state, unavailable features are skipped silently.
pub(crate) fn show_status<T: Toggle>(
    out: &mut impl Write,
    feature: &Feature<'_, T>,
) -> io::Result<()> {
    if !feature.toggle.available() {
        return Ok(());
    }

    match feature.toggle.enabled() {
        Ok(true) => writeln!(out, "{} is ENABLED.", feature.status_name),
        Ok(false) => writeln!(out, "{} is DISABLED.", feature.status_name),
        Err(error) => writeln!(
            out,
            "Error while obtaining status of {}: {error}",
            feature.action_name
        ),
    }
}

/// All controlled features of the machine.
pub(crate) struct Features<'toggle, C, P, B, A> {
    pub(crate) c6: Feature<'toggle, C>,
    pub(crate) psic_workaround: Feature<'toggle, P>,
    pub(crate) boosting: Feature<'toggle, B>,
    pub(crate) aslr: Feature<'toggle, A>,
}

/// Applies the profile feature by feature, then prints the resulting status.
/// PSIC workaround follows C6, both of them write package C6.
pub(crate) fn apply_profile<C, P, B, A>(
    out: &mut impl Write,
    features: &Features<'_, C, P, B, A>,
    profile: &Profile,
) -> io::Result<()>
where
    C: Toggle,
    P: Toggle,
    B: Toggle,
    A: Toggle,
{
    apply(out, &features.c6, profile.c6)?;
    apply(out, &features.psic_workaround, profile.psic_workaround)?;
    apply(out, &features.boosting, profile.boosting)?;
    apply(out, &features.aslr, profile.aslr)?;

    writeln!(out)?;
    show_status(out, &features.psic_workaround)?;
    show_status(out, &features.c6)?;
    show_status(out, &features.aslr)?;
    show_status(out, &features.boosting)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    struct FakeToggle {
        name: &'static str,
        journal: Option<Rc<RefCell<Vec<String>>>>,
        enabled: Cell<bool>,
        absent: bool,
        broken: bool,
    }

    impl FakeToggle {
        fn check(&self) -> Result<(), std::io::Error> {
            if self.broken {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "device is busy",
                ));
            }
            Ok(())
        }

        fn record(&self, event: &str) {
            if let Some(journal) = &self.journal {
                journal.borrow_mut().push(format!("{event} {}", self.name));
            }
        }
    }

    impl Toggle for FakeToggle {
        type Error = std::io::Error;

        fn enable(&self) -> Result<(), Self::Error> {
            self.record("enable");
            self.check()?;
            self.enabled.set(true);
            Ok(())
        }

        fn disable(&self) -> Result<(), Self::Error> {
            self.record("disable");
            self.check()?;
            self.enabled.set(false);
            Ok(())
        }

        fn enabled(&self) -> Result<bool, Self::Error> {
            self.check()?;
            Ok(self.enabled.get())
        }

        fn available(&self) -> bool {
            !self.absent
        }
    }

    fn feature(toggle: &FakeToggle) -> Feature<'_, FakeToggle> {
        Feature::new(toggle, "widget", "Widget", Some("Widget unavailable."))
    }

    fn applied(toggle: &FakeToggle, action: ToggleAction) -> String {
        let mut out = Vec::new();
        apply(&mut out, &feature(toggle), action).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn status(toggle: &FakeToggle) -> String {
        let mut out = Vec::new();
        show_status(&mut out, &feature(toggle)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn successful_actions_are_reported() {
        let toggle = FakeToggle::default();

        assert_eq!(
            applied(&toggle, ToggleAction::Enable),
            "Enabling widget:   SUCCESS\n"
        );
        assert!(toggle.enabled.get());
        assert_eq!(
            applied(&toggle, ToggleAction::Disable),
            "Disabling widget:   SUCCESS\n"
        );
        assert!(!toggle.enabled.get());
    }

    #[test]
    fn keep_does_nothing() {
        let toggle = FakeToggle {
            enabled: Cell::new(true),
            ..FakeToggle::default()
        };

        assert_eq!(applied(&toggle, ToggleAction::Keep), "");
        assert!(toggle.enabled.get());
    }

    #[test]
    fn failure_is_reported_inline() {
        let toggle = FakeToggle {
            broken: true,
            ..FakeToggle::default()
        };

        assert_eq!(
            applied(&toggle, ToggleAction::Enable),
            "Enabling widget:   oops: device is busy\n"
        );
    }

    #[test]
    fn unavailable_feature_is_hinted_and_skipped() {
        let toggle = FakeToggle {
            absent: true,
            ..FakeToggle::default()
        };

        assert_eq!(
            applied(&toggle, ToggleAction::Enable),
            "Widget unavailable.\n"
        );
        assert!(!toggle.enabled.get());
        assert_eq!(status(&toggle), "");
    }

    #[test]
    fn status_lines() {
        let toggle = FakeToggle::default();
        assert_eq!(status(&toggle), "Widget is DISABLED.\n");

        toggle.enabled.set(true);
        assert_eq!(status(&toggle), "Widget is ENABLED.\n");

        let broken = FakeToggle {
            broken: true,
            ..FakeToggle::default()
        };
        assert_eq!(
            status(&broken),
            "Error while obtaining status of widget: device is busy\n"
        );
    }

    #[test]
    fn unavailable_feature_without_hint_is_skipped_silently() {
        let toggle = FakeToggle {
            absent: true,
            ..FakeToggle::default()
        };
        let feature = Feature::new(&toggle, "widget", "Widget", None);

        let mut out = Vec::new();
        apply(&mut out, &feature, ToggleAction::Disable).unwrap();

        assert!(out.is_empty());
    }

    #[test]
    fn profile_is_applied_in_fixed_order() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let toggle = |name| FakeToggle {
            name,
            journal: Some(journal.clone()),
            ..FakeToggle::default()
        };
        let c6 = toggle("c6");
        let psic_workaround = toggle("psic");
        let boosting = toggle("boosting");
        let aslr = FakeToggle {
            enabled: Cell::new(true),
            ..toggle("aslr")
        };
        let features = Features {
            c6: Feature::new(&c6, "C6", "C6", Some("C6 unavailable.")),
            psic_workaround: Feature::new(&psic_workaround, "PSIC", "PSIC", None),
            boosting: Feature::new(&boosting, "boosting", "Boosting", None),
            aslr: Feature::new(&aslr, "ASLR", "ASLR", None),
        };
        let profile = Profile {
            c6: ToggleAction::Disable,
            psic_workaround: ToggleAction::Enable,
            boosting: ToggleAction::Enable,
            aslr: ToggleAction::Disable,
        };

        let mut out = Vec::new();
        apply_profile(&mut out, &features, &profile).unwrap();

        let expected_journal = vec![
            "disable c6".to_string(),
            "enable psic".to_string(),
            "enable boosting".to_string(),
            "disable aslr".to_string(),
        ];
        assert_eq!(*journal.borrow(), expected_journal);

        let expected_out = "Disabling C6:   SUCCESS\n\
                            Enabling PSIC:   SUCCESS\n\
                            Enabling boosting:   SUCCESS\n\
                            Disabling ASLR:   SUCCESS\n\
                            \n\
                            PSIC is ENABLED.\n\
                            C6 is DISABLED.\n\
                            ASLR is DISABLED.\n\
                            Boosting is ENABLED.\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected_out);
    }

    #[test]
    fn kept_profile_prints_only_available_status() {
        let c6 = FakeToggle {
            absent: true,
            ..FakeToggle::default()
        };
        let psic_workaround = FakeToggle {
            absent: true,
            ..FakeToggle::default()
        };
        let boosting = FakeToggle {
            absent: true,
            ..FakeToggle::default()
        };
        let aslr = FakeToggle::default();
        let features = Features {
            c6: Feature::new(&c6, "C6", "C6", Some("C6 unavailable.")),
            psic_workaround: Feature::new(&psic_workaround, "PSIC", "PSIC", None),
            boosting: Feature::new(&boosting, "boosting", "Boosting", None),
            aslr: Feature::new(&aslr, "ASLR", "ASLR", None),
        };

        let mut out = Vec::new();
        apply_profile(&mut out, &features, &Profile::default()).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "\nASLR is DISABLED.\n");
    }
}
