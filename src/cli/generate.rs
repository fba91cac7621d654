//! `generate` command

use crate::cli::display::{StatusIcon, TableRenderer};
use crate::domain::config::{
    apply_to_build_config, parse_dynamic_configs, BuildConfig, ManifestConf, OutputFormat,
    OutputProfile,
};
use crate::domain::pipeline::ManifestPipeline;
use crate::infrastructure::output::OutputTarget;
use anyhow::Context;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
pub struct GenerateCommand {
    /// Path to the CSV image list (single column, or header with image[,name,port])
    #[arg(long, value_name = "PATH")]
    pub csv: String,

    /// Deployment name, also used for the app label and selector
    #[arg(long)]
    pub name: String,

    /// Kubernetes namespace (omitted from the manifest when not set)
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,

    /// Replica count [default: 1]
    #[arg(long)]
    pub replicas: Option<i32>,

    /// Default container port when a row has none [default: none, 8080 for extended]
    #[arg(long, visible_alias = "container-port")]
    pub port: Option<u16>,

    /// Image pull policy (Always, IfNotPresent, Never) [default: Always]
    #[arg(long)]
    pub pull_policy: Option<String>,

    /// Output profile (minimal, extended) [default: minimal]
    ///
    /// extended adds progressDeadlineSeconds, revisionHistoryLimit, rollingUpdate
    /// tuning, metadata labels, a non-privileged securityContext and IBM-style
    /// port/resource defaults.
    #[arg(long)]
    pub profile: Option<String>,

    /// Container naming (explicit, derive-from-image, reuse-deployment-name)
    /// [default: explicit, reuse-deployment-name for extended]
    #[arg(long)]
    pub container_naming: Option<String>,

    /// CPU request (e.g. 450m)
    #[arg(long = "req-cpu", visible_alias = "requests-cpu")]
    pub requests_cpu: Option<String>,

    /// Memory request (e.g. 512Mi)
    #[arg(long = "req-mem", visible_alias = "requests-memory")]
    pub requests_memory: Option<String>,

    /// CPU limit
    #[arg(long = "lim-cpu", visible_alias = "limits-cpu")]
    pub limits_cpu: Option<String>,

    /// Memory limit
    #[arg(long = "lim-mem", visible_alias = "limits-memory")]
    pub limits_memory: Option<String>,

    /// progressDeadlineSeconds (extended profile only) [default: 600]
    #[arg(long)]
    pub progress_deadline: Option<i32>,

    /// revisionHistoryLimit (extended profile only) [default: 10]
    #[arg(long)]
    pub revision_history: Option<i32>,

    /// rollingUpdate.maxSurge (extended profile only) [default: 25%]
    #[arg(long)]
    pub max_surge: Option<String>,

    /// rollingUpdate.maxUnavailable (extended profile only) [default: 25%]
    #[arg(long)]
    pub max_unavailable: Option<String>,

    /// Output file; standard output when omitted or "-"
    #[arg(long, short = 'o', value_name = "PATH")]
    pub out: Option<String>,

    /// Output format (yaml, json) [default: yaml]
    #[arg(long)]
    pub output_format: Option<String>,

    /// TOML file with generation settings
    #[arg(long, value_name = "PATH")]
    pub config_file: Option<String>,

    /// Override any setting (-D key=value), applied last
    ///
    /// Keys: deployment.namespace, deployment.replicas, container.port,
    /// container.pull-policy, container.naming, resources.requests.cpu,
    /// resources.requests.memory, resources.limits.cpu, resources.limits.memory,
    /// rollout.max-surge, rollout.max-unavailable, rollout.progress-deadline,
    /// rollout.revision-history
    ///
    /// Example: -Ddeployment.replicas=3 -Dresources.limits.memory=1Gi
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,
}

impl GenerateCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let file_conf = match self.config_file {
            Some(ref path) => Some(ManifestConf::from(path)?),
            None => None,
        };

        let (config, format) = self.resolve(file_conf.as_ref())?;
        let pipeline = ManifestPipeline::new(config, format)?;
        let target = OutputTarget::from_path(self.out.as_deref());

        let report = pipeline
            .run(&self.csv, &target)
            .with_context(|| format!("Failed to generate manifest from {}", self.csv))?;

        if let OutputTarget::File(ref path) = report.target {
            eprintln!(
                "{} Wrote {} with {} container(s).",
                StatusIcon::SUCCESS,
                path.display(),
                report.containers.len()
            );
            eprintln!("{}", TableRenderer::new().render_containers(&report.containers));
        }
        Ok(())
    }

    /// Priority: -D properties > command line > config file > profile defaults
    pub fn resolve(
        &self,
        file_conf: Option<&ManifestConf>,
    ) -> anyhow::Result<(BuildConfig, OutputFormat)> {
        let profile = match self.profile {
            Some(ref p) => p.parse::<OutputProfile>()?,
            None => match file_conf {
                Some(conf) => conf.profile()?.unwrap_or_default(),
                None => OutputProfile::default(),
            },
        };

        let format = match self.output_format {
            Some(ref f) => f.parse::<OutputFormat>()?,
            None => match file_conf {
                Some(conf) => conf.output_format()?.unwrap_or_default(),
                None => OutputFormat::default(),
            },
        };

        let mut config = profile.default_config(self.name.clone());
        if let Some(conf) = file_conf {
            conf.apply_to(&mut config)?;
        }

        self.apply_flags(&mut config)?;

        if !self.properties.is_empty() {
            let properties = parse_dynamic_configs(&self.properties)?;
            apply_to_build_config(&properties, &mut config)?;
        }

        if !profile.is_extended() && (self.has_rollout_flags() || config.ignores_rollout()) {
            tracing::warn!(
                "rollout settings (flags, [rollout] or -D rollout.*) only apply to the extended profile and are ignored"
            );
        }

        Ok((config, format))
    }

    fn apply_flags(&self, config: &mut BuildConfig) -> anyhow::Result<()> {
        if let Some(ref namespace) = self.namespace {
            let namespace = namespace.trim();
            config.namespace = (!namespace.is_empty()).then(|| namespace.to_string());
        }
        if let Some(replicas) = self.replicas {
            config.replicas = replicas;
        }
        if let Some(port) = self.port {
            config.container_port = Some(port);
        }
        if let Some(ref policy) = self.pull_policy {
            config.pull_policy = policy.parse()?;
        }
        if let Some(ref naming) = self.container_naming {
            config.naming = naming.parse()?;
        }

        let resources = &mut config.resources;
        for (flag, target) in [
            (&self.requests_cpu, &mut resources.requests_cpu),
            (&self.requests_memory, &mut resources.requests_memory),
            (&self.limits_cpu, &mut resources.limits_cpu),
            (&self.limits_memory, &mut resources.limits_memory),
        ] {
            if let Some(value) = flag {
                *target = Some(value.clone());
            }
        }

        let rollout = &mut config.rollout;
        if let Some(deadline) = self.progress_deadline {
            rollout.progress_deadline_seconds = deadline;
        }
        if let Some(history) = self.revision_history {
            rollout.revision_history_limit = history;
        }
        if let Some(ref surge) = self.max_surge {
            rollout.max_surge = surge.clone();
        }
        if let Some(ref unavailable) = self.max_unavailable {
            rollout.max_unavailable = unavailable.clone();
        }

        Ok(())
    }

    fn has_rollout_flags(&self) -> bool {
        self.progress_deadline.is_some()
            || self.revision_history.is_some()
            || self.max_surge.is_some()
            || self.max_unavailable.is_some()
    }
}
