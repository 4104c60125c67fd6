use bytes::Bytes;

/// Linear wizard steps. `Capture` and `Preview` cycle on retake; `Loading`
/// leaves only via server settlement; `Result` returns to `Search` only
/// through an explicit restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Search,
    Capture,
    Preview,
    Loading,
    Result,
}

/// Side effect the host UI must run after a transition. Camera hardware must
/// be released on every terminal or back-navigation transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    StartCamera,
    StopCamera,
}

/// Directory lookup result fed into the search step.
#[derive(Debug, Clone)]
pub enum VerifyOutcome {
    Found(VerifiedUser),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedUser {
    pub id: String,
    pub name: String,
    pub gender: String,
    pub career: String,
}

#[derive(Debug, Default)]
pub struct Wizard {
    step: Step,
    cedula: String,
    user: Option<VerifiedUser>,
    captured: Option<Bytes>,
    result_image: Option<String>,
    message: Option<String>,
    camera_active: bool,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn user(&self) -> Option<&VerifiedUser> {
        self.user.as_ref()
    }

    pub fn captured(&self) -> Option<&Bytes> {
        self.captured.as_ref()
    }

    pub fn result_image(&self) -> Option<&str> {
        self.result_image.as_deref()
    }

    pub fn camera_active(&self) -> bool {
        self.camera_active
    }

    /// Search → Capture, gated on the directory check. Not-found keeps the
    /// wizard in Search with an error message and no state change.
    pub fn proceed_to_capture(&mut self, cedula: &str, outcome: VerifyOutcome) -> Effect {
        if self.step() != Step::Search {
            return Effect::None;
        }
        if cedula.trim().is_empty() {
            self.message = Some("Por favor ingresa tu documento de identidad.".into());
            return Effect::None;
        }
        match outcome {
            VerifyOutcome::Found(user) => {
                self.cedula = cedula.to_string();
                self.user = Some(user);
                self.message = None;
                self.step = Step::Capture;
                self.camera_active = true;
                Effect::StartCamera
            }
            VerifyOutcome::NotFound => {
                self.message = Some(
                    "Usuario no encontrado con ese documento de identidad. Verifica que el número sea correcto."
                        .into(),
                );
                Effect::None
            }
        }
    }

    /// Capture → Preview with the mirrored PNG blob.
    pub fn photo_captured(&mut self, png: Bytes) {
        if self.step() != Step::Capture {
            return;
        }
        self.captured = Some(png);
        self.step = Step::Preview;
    }

    /// Preview → Capture; the previous blob is discarded.
    pub fn retake(&mut self) {
        if self.step() != Step::Preview {
            return;
        }
        self.captured = None;
        self.step = Step::Capture;
    }

    /// Preview → Loading. Returns the (cedula, blob) pair to upload; `None`
    /// when there is nothing to submit.
    pub fn submit(&mut self) -> Option<(String, Bytes)> {
        if self.step() != Step::Preview {
            return None;
        }
        let blob = match &self.captured {
            Some(blob) => blob.clone(),
            None => {
                self.message = Some("Error: Faltan datos para procesar".into());
                return None;
            }
        };
        self.step = Step::Loading;
        Some((self.cedula.clone(), blob))
    }

    /// Loading → Result. Releases the camera.
    pub fn server_success(
        &mut self,
        user: VerifiedUser,
        image_url: Option<String>,
        generated: bool,
    ) -> Effect {
        if self.step() != Step::Loading {
            return Effect::None;
        }
        self.message = Some(if generated {
            format!(
                "¡Increíble {}! Tu nueva foto de graduación ha sido generada exitosamente.",
                user.name
            )
        } else {
            format!("¡Excelente {}! Aquí está tu foto de graduación.", user.name)
        });
        self.user = Some(user);
        self.result_image = image_url;
        self.step = Step::Result;
        self.release_camera()
    }

    /// Loading → Preview, keeping the captured blob so the user can retry the
    /// submission without re-capturing.
    pub fn server_failure(&mut self, not_found: bool) {
        if self.step() != Step::Loading {
            return;
        }
        self.message = Some(if not_found {
            "Usuario no encontrado con ese documento de identidad.".into()
        } else {
            "Error al procesar la imagen. Inténtalo de nuevo.".into()
        });
        self.step = Step::Preview;
    }

    /// Result → Search; full reset.
    pub fn restart(&mut self) -> Effect {
        if self.step() != Step::Result {
            return Effect::None;
        }
        let effect = self.release_camera();
        *self = Self::new();
        effect
    }

    /// Capture → Search back-navigation.
    pub fn go_back(&mut self) -> Effect {
        if self.step() != Step::Capture {
            return Effect::None;
        }
        self.message = None;
        self.step = Step::Search;
        self.release_camera()
    }

    fn release_camera(&mut self) -> Effect {
        if self.camera_active {
            self.camera_active = false;
            Effect::StopCamera
        } else {
            Effect::None
        }
    }
}
