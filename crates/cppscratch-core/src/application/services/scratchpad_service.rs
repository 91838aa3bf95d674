//! Scratchpad Manager - the lifecycle orchestrator.
//!
//! Coordinates the whole life of a scratchpad:
//! 1. Copy the template into a fresh directory and place the cursor
//! 2. Generate build files with the active build tool
//! 3. Compile, then either show diagnostics or run the binary
//! 4. Tear everything down when the display surface closes
//!
//! Every operation is synchronous: build commands run to completion before
//! control returns.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{ExecutableResolver, Filesystem, ShellRunner, Workbench},
    },
    domain::{
        BINARY_NAME, BUILD_DIR, BuildToolDescriptor, BuildToolRegistry, CursorPosition,
        HookList, OutputHandle, OutputMode, SCRATCH_PREFIX,
        ScratchpadInstance, ScratchpadSettings, take_marker,
    },
    error::{ScratchError, ScratchResult},
};

/// Compilation database emitted by the build tools.
const COMPILE_COMMANDS: &str = "compile_commands.json";

/// Outcome of [`ScratchpadManager::compile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    /// Build tool that ran.
    pub tool: String,
    /// Whether the compile command exited successfully.
    pub success: bool,
    /// Whether the binary was sent to the output terminal.
    pub ran: bool,
    /// The output surface created for this compile.
    pub output: OutputHandle,
}

/// First tool in `registry` whose executable resolves on the search path.
pub fn select_build_tool<'a>(
    registry: &'a BuildToolRegistry,
    resolver: &dyn ExecutableResolver,
) -> Option<&'a BuildToolDescriptor> {
    registry.iter().find(|tool| match resolver.resolve(&tool.name) {
        Some(path) => {
            debug!(tool = %tool.name, path = %path.display(), "Build tool resolved");
            true
        }
        None => {
            debug!(tool = %tool.name, "Build tool not on PATH");
            false
        }
    })
}

/// Quote `path` for POSIX `sh`.
pub fn shell_quote(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', r"'\''"))
}

/// `command` prefixed with a `cd` into `dir`.
fn in_dir(dir: &Path, command: &str) -> String {
    format!("cd {} && {}", shell_quote(dir), command)
}

/// Creates, compiles, and destroys scratchpads.
pub struct ScratchpadManager {
    settings: ScratchpadSettings,
    active_tool: Option<BuildToolDescriptor>,
    filesystem: Box<dyn Filesystem>,
    shell: Box<dyn ShellRunner>,
    workbench: Box<dyn Workbench>,
    pre_compile: HookList,
    pre_destroy: HookList,
}

impl ScratchpadManager {
    /// Create a manager.
    ///
    /// The active build tool is selected here, once, using `resolver`.
    pub fn new(
        settings: ScratchpadSettings,
        resolver: &dyn ExecutableResolver,
        filesystem: Box<dyn Filesystem>,
        shell: Box<dyn ShellRunner>,
        workbench: Box<dyn Workbench>,
    ) -> ScratchResult<Self> {
        settings.validate().map_err(ScratchError::Domain)?;

        let active_tool = select_build_tool(&settings.build_tools, resolver).cloned();
        match &active_tool {
            Some(tool) => info!(tool = %tool.name, "Active build tool selected"),
            None => warn!(
                tried = ?settings.build_tools.names(),
                "No build tool found on PATH; compilation will fail"
            ),
        }

        Ok(Self {
            settings,
            active_tool,
            filesystem,
            shell,
            workbench,
            pre_compile: HookList::new(),
            pre_destroy: HookList::new(),
        })
    }

    pub fn settings(&self) -> &ScratchpadSettings {
        &self.settings
    }

    pub fn active_tool(&self) -> Option<&BuildToolDescriptor> {
        self.active_tool.as_ref()
    }

    /// Hooks run before every compile.
    pub fn pre_compile_hooks_mut(&mut self) -> &mut HookList {
        &mut self.pre_compile
    }

    /// Hooks run before a scratchpad is destroyed.
    pub fn pre_destroy_hooks_mut(&mut self) -> &mut HookList {
        &mut self.pre_destroy
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Create a scratchpad from the template.
    #[instrument(skip_all, fields(template = %self.settings.template_dir.display()))]
    pub fn create_scratchpad(&self) -> ScratchResult<ScratchpadInstance> {
        let template = &self.settings.template_dir;
        if !self.filesystem.is_dir(template) {
            return Err(ApplicationError::TemplateMissing {
                path: template.clone(),
            }
            .into());
        }

        let path = self
            .filesystem
            .create_scratch_dir(&self.settings.scratch_root, SCRATCH_PREFIX)?;
        info!(path = %path.display(), "Scratchpad directory allocated");

        match self.populate(&path) {
            Ok(instance) => {
                info!(scratchpad = %instance.name(), cursor = %instance.cursor(), "Scratchpad ready");
                Ok(instance)
            }
            Err(e) => {
                warn!(error = %e, "Scratchpad creation failed, attempting rollback");
                self.rollback(&path);
                Err(e)
            }
        }
    }

    /// Rebuild an instance for an existing scratchpad directory.
    ///
    /// `path` may point anywhere inside the scratchpad, e.g. its `builddir`.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn attach(&self, path: &Path) -> ScratchResult<ScratchpadInstance> {
        let root = path
            .ancestors()
            .find(|p| self.settings.owns(p))
            .filter(|p| self.filesystem.is_dir(p))
            .ok_or_else(|| ApplicationError::NotInScratchpad {
                path: path.to_path_buf(),
            })?;

        let entry = root.join(&self.settings.entry_file);
        let cursor = CursorPosition::default();
        let display = self.workbench.open_display(&entry, cursor)?;
        self.workbench.enter_scratchpad_mode(display)?;

        debug!(scratchpad = %root.display(), "Attached to existing scratchpad");
        Ok(ScratchpadInstance::new(
            root.to_path_buf(),
            entry,
            display,
            cursor,
        ))
    }

    /// Live scratchpad directories under the scratch root, sorted.
    pub fn list_scratchpads(&self) -> ScratchResult<Vec<PathBuf>> {
        let root = &self.settings.scratch_root;
        if !self.filesystem.is_dir(root) {
            return Ok(Vec::new());
        }
        let mut pads: Vec<PathBuf> = self
            .filesystem
            .list_dir(root)?
            .into_iter()
            .filter(|p| self.settings.owns(p) && self.filesystem.is_dir(p))
            .collect();
        pads.sort();
        Ok(pads)
    }

    /// Recreate `builddir` with the active build tool.
    ///
    /// Returns whether generation succeeded. Without an active tool this is
    /// skipped and reports `false`.
    #[instrument(skip_all, fields(scratchpad = %instance.name()))]
    pub fn regenerate_build_files(&self, instance: &ScratchpadInstance) -> ScratchResult<bool> {
        let Some(tool) = self.active_tool.as_ref() else {
            warn!("No build tool available, skipping build file generation");
            return Ok(false);
        };
        self.regenerate_with(tool, instance.path(), &mut |chunk: &[u8]| {
            debug!(target: "cppscratch_core::build", "{}", String::from_utf8_lossy(chunk).trim_end());
        })
    }

    /// Compile the scratchpad, then run it if `run_after` and the build
    /// succeeded.
    ///
    /// A failing build is reported through [`CompileReport::success`], not
    /// as an error.
    #[instrument(skip_all, fields(scratchpad = %instance.name(), run_after = run_after))]
    pub fn compile(
        &self,
        instance: &mut ScratchpadInstance,
        run_after: bool,
    ) -> ScratchResult<CompileReport> {
        let output = self.replace_output(instance)?;
        self.workbench.save_display(instance.display())?;
        self.pre_compile.run();

        let Some(tool) = self.active_tool.as_ref() else {
            let err = ApplicationError::NoBuildToolFound {
                tried: self
                    .settings
                    .build_tools
                    .names()
                    .into_iter()
                    .map(String::from)
                    .collect(),
            };
            self.workbench
                .append_output(output, format!("{err}\n").as_bytes())?;
            self.workbench
                .set_output_mode(output, OutputMode::Diagnostics)?;
            return Err(err.into());
        };

        let mut sink = |chunk: &[u8]| {
            if let Err(e) = self.workbench.append_output(output, chunk) {
                warn!(error = %e, "Dropped build output");
            }
        };

        if !self.filesystem.exists(&tool.signature_path(instance.path())) {
            info!(tool = %tool.name, "Build directory missing or stale, regenerating");
            let generated = self.regenerate_with(tool, instance.path(), &mut sink);
            if !matches!(generated, Ok(true)) {
                self.workbench
                    .set_output_mode(output, OutputMode::Diagnostics)?;
            }
            if !generated? {
                warn!(tool = %tool.name, "Skipping compile, build files were not generated");
                return Ok(CompileReport {
                    tool: tool.name.clone(),
                    success: false,
                    ran: false,
                    output,
                });
            }
        }

        let command_line = in_dir(instance.path(), &tool.compile_command);
        info!(tool = %tool.name, "Compiling");
        let success = match self.shell.run(&command_line, &mut sink) {
            Ok(success) => success,
            Err(e) => {
                self.workbench
                    .set_output_mode(output, OutputMode::Diagnostics)?;
                return Err(e);
            }
        };

        let ran = success && run_after;
        if ran {
            self.workbench.set_output_mode(output, OutputMode::Terminal)?;
            let run_line = format!(
                "cd {} && ./{}",
                shell_quote(&instance.build_dir()),
                BINARY_NAME
            );
            self.workbench.send_input(output, &run_line)?;
        } else {
            if !success {
                warn!(tool = %tool.name, "Build failed");
            }
            self.workbench
                .set_output_mode(output, OutputMode::Diagnostics)?;
        }

        Ok(CompileReport {
            tool: tool.name.clone(),
            success,
            ran,
            output,
        })
    }

    /// Tear a scratchpad down: hooks, output surface, directory.
    #[instrument(skip_all, fields(scratchpad = %instance.name()))]
    pub fn destroy_scratchpad(&self, instance: ScratchpadInstance) -> ScratchResult<()> {
        self.pre_destroy.run();

        if let Some(output) = instance.output {
            if self.workbench.is_output_live(output) {
                self.workbench.close_output(output)?;
            }
        }

        self.filesystem.remove_dir_all(instance.path())?;
        self.workbench.mark_unmodified(instance.display())?;

        info!(path = %instance.path().display(), "Scratchpad destroyed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Copy the template into `path`, place the cursor, open the display.
    fn populate(&self, path: &Path) -> ScratchResult<ScratchpadInstance> {
        self.filesystem
            .copy_dir_all(&self.settings.template_dir, path)?;

        let entry = path.join(&self.settings.entry_file);
        let contents = self.filesystem.read_file(&entry)?;
        let marked =
            take_marker(&contents, self.settings.marker, &entry).map_err(ScratchError::Domain)?;
        self.filesystem.write_file(&entry, &marked.contents)?;

        let display = self.workbench.open_display(&entry, marked.cursor)?;
        let instance = ScratchpadInstance::new(path.to_path_buf(), entry, display, marked.cursor);

        if let Err(e) = self.regenerate_build_files(&instance) {
            warn!(error = %e, "Build file generation failed");
        }

        self.workbench.enter_scratchpad_mode(display)?;
        Ok(instance)
    }

    fn regenerate_with(
        &self,
        tool: &BuildToolDescriptor,
        root: &Path,
        on_output: &mut dyn FnMut(&[u8]),
    ) -> ScratchResult<bool> {
        let build_dir = root.join(BUILD_DIR);
        if self.filesystem.is_dir(&build_dir) {
            self.filesystem.remove_dir_all(&build_dir)?;
        }

        let command_line = in_dir(root, &tool.builddir_gen_command);
        let success = self.shell.run(&command_line, on_output)?;
        if !success {
            warn!(tool = %tool.name, "Build file generation exited with an error");
            return Ok(false);
        }

        self.link_compile_commands(root);
        Ok(true)
    }

    /// Best effort; the link may dangle if the tool emits no database.
    fn link_compile_commands(&self, root: &Path) {
        let target = Path::new(BUILD_DIR).join(COMPILE_COMMANDS);
        let link = root.join(COMPILE_COMMANDS);
        if let Err(e) = self.filesystem.symlink(&target, &link) {
            debug!(error = %e, "Could not link {COMPILE_COMMANDS}");
        }
    }

    /// Close the current output surface (if live) and open a fresh one.
    fn replace_output(&self, instance: &mut ScratchpadInstance) -> ScratchResult<OutputHandle> {
        if let Some(old) = instance.output.take() {
            if self.workbench.is_output_live(old) {
                self.workbench.close_output(old)?;
            }
        }
        let output = self
            .workbench
            .open_output(&format!("{} output", instance.name()))?;
        instance.output = Some(output);
        Ok(output)
    }

    /// Best-effort removal of a half-created scratchpad.
    fn rollback(&self, path: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(path) {
            warn!(
                error = %e,
                path = %path.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}

impl std::fmt::Debug for ScratchpadManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchpadManager")
            .field("settings", &self.settings)
            .field("active_tool", &self.active_tool)
            .field("pre_compile", &self.pre_compile)
            .field("pre_destroy", &self.pre_destroy)
            .finish_non_exhaustive()
    }
}
