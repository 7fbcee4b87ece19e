//! Template Renderer - load, substitute, write.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ports::Filesystem;
use crate::domain::{RenderJob, ReplacementSet};
use crate::error::ForgeResult;

pub struct RenderService {
    filesystem: Arc<dyn Filesystem>,
}

impl RenderService {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Render `template` into `output`.
    ///
    /// Nothing is written if the template cannot be read. The output's
    /// parent directory must already exist.
    #[instrument(skip_all, fields(template = %template.display(), output = %output.display()))]
    pub fn render(
        &self,
        template: &Path,
        output: &Path,
        replacements: &ReplacementSet,
    ) -> ForgeResult<()> {
        let source = self.filesystem.read_to_string(template)?;
        let rendered = replacements.apply(&source);

        self.filesystem.write_file(output, &rendered)?;
        debug!(tokens = replacements.len(), bytes = rendered.len(), "Rendered");
        Ok(())
    }

    pub fn render_job(&self, job: &RenderJob) -> ForgeResult<()> {
        self.render(&job.template, &job.output, &job.replacements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, ports::MockFilesystem};
    use crate::error::ForgeError;

    #[test]
    fn substitutes_and_writes() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_to_string()
            .returning(|_| Ok("name=@PROJECT_NAME@;again=@PROJECT_NAME@".into()));
        fs.expect_write_file()
            .withf(|path, content| {
                path.as_os_str() == "out/CMakeLists.txt" && content == "name=Demo;again=Demo"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = RenderService::new(Arc::new(fs));
        let set = ReplacementSet::new().with("@PROJECT_NAME@", "Demo");
        service
            .render(Path::new("t.txt"), Path::new("out/CMakeLists.txt"), &set)
            .unwrap();
    }

    #[test]
    fn unreadable_template_writes_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_to_string().returning(|p| {
            Err(ApplicationError::FileRead {
                path: p.to_path_buf(),
                reason: "No such file or directory (os error 2)".into(),
            }
            .into())
        });
        fs.expect_write_file().never();

        let service = RenderService::new(Arc::new(fs));
        let err = service
            .render(Path::new("missing.txt"), Path::new("out.txt"), &ReplacementSet::new())
            .unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::FileRead { .. })
        ));
    }

    #[test]
    fn write_failure_propagates() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_to_string().returning(|_| Ok("x".into()));
        fs.expect_write_file().returning(|p, _| {
            Err(ApplicationError::FileWrite {
                path: p.to_path_buf(),
                reason: "No such file or directory (os error 2)".into(),
            }
            .into())
        });

        let service = RenderService::new(Arc::new(fs));
        let err = service
            .render(Path::new("t.txt"), Path::new("nodir/out.txt"), &ReplacementSet::new())
            .unwrap_err();
        assert!(err.is_filesystem());
    }
}
