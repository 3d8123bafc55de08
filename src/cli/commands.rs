//! Command handlers.
//!
//! Each handler opens the stored configuration, performs its endpoint calls
//! and prints the result.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use cloudlaunch::clients::Params;
use cloudlaunch::rest::resources::{Cloud, Deployment};
use cloudlaunch::{ApiClient, CloudCredentials, ConfigStore, Endpoint, Resource};

use super::render;
use super::{
    ApplicationCommand, CloudCommand, ConfigCommand, DeploymentCommand, RegionCommand,
    VmTypeCommand, ZoneCommand,
};

pub fn config(command: ConfigCommand) -> Result<()> {
    let mut store = ConfigStore::open_default()?;
    match command {
        ConfigCommand::Set { name, value } => store
            .set(&name, &value)
            .with_context(|| format!("Unable to set {name}")),
        ConfigCommand::Show => {
            for (name, value) in store.entries() {
                println!("{name}={value}");
            }
            Ok(())
        }
    }
}

pub async fn deployments(command: DeploymentCommand) -> Result<()> {
    let client = client()?;
    match command {
        DeploymentCommand::Create {
            name,
            application,
            cloud,
            application_version,
            config_app,
            credentials_file,
        } => {
            let target = client.clouds().get(cloud.as_str(), Params::new()).await?;
            let credentials = Cloud::new(&target)
                .and_then(|cloud| cloud.cloud_type())
                .and_then(|cloud_type| load_credentials(cloud_type, credentials_file.as_deref()));
            if credentials.is_none() {
                tracing::info!("No cloud credentials found for {}", cloud);
            }
            client.set_cloud_credentials(credentials);

            let mut params = Params::new();
            params.insert("name".to_string(), name.into());
            params.insert("application".to_string(), application.into());
            params.insert("target_cloud".to_string(), cloud.into());
            if let Some(version) = application_version {
                params.insert("application_version".to_string(), version.into());
            }
            if let Some(path) = config_app {
                params.insert("config_app".to_string(), read_json(&path)?);
            }

            let deployment = client.deployments().create(params).await?;
            print!("{}", render::deployments(&[deployment]));
        }
        DeploymentCommand::List { archived } => {
            let mut params = Params::new();
            params.insert("archived".to_string(), archived.into());
            let deployments = client.deployments().list(params).await?;
            print!("{}", render::deployments(&deployments));
        }
        DeploymentCommand::HealthCheck { id } => {
            let resource = client.deployments().get(id, Params::new()).await?;
            let task = as_deployment(&resource)?.run_health_check().await?;
            println!("{}", render::task(&task));
        }
        DeploymentCommand::Restart { id } => {
            let resource = client.deployments().get(id, Params::new()).await?;
            let task = as_deployment(&resource)?.run_restart().await?;
            println!("{}", render::task(&task));
        }
        DeploymentCommand::Delete { id } => {
            let resource = client.deployments().get(id, Params::new()).await?;
            let task = as_deployment(&resource)?.run_delete().await?;
            println!("{}", render::task(&task));
        }
    }
    Ok(())
}

pub async fn applications(command: ApplicationCommand) -> Result<()> {
    let client = client()?;
    match command {
        ApplicationCommand::Create {
            name,
            summary,
            maintainer,
            description,
            info_url,
            icon_url,
        } => {
            let mut params = Params::new();
            params.insert("name".to_string(), name.into());
            let optional = [
                ("summary", summary),
                ("maintainer", maintainer),
                ("description", description),
                ("info_url", info_url),
                ("icon_url", icon_url),
            ];
            for (key, value) in optional {
                if let Some(value) = value {
                    params.insert(key.to_string(), value.into());
                }
            }

            let application = client.applications().create(params).await?;
            print!("{}", render::applications(&[application]));
        }
        ApplicationCommand::List => {
            let applications = client.applications().list(Params::new()).await?;
            print!("{}", render::applications(&applications));
        }
    }
    Ok(())
}

pub async fn clouds(command: CloudCommand) -> Result<()> {
    let client = client()?;
    match command {
        CloudCommand::List => {
            let clouds = client.clouds().list(Params::new()).await?;
            print!("{}", render::clouds(&clouds));
        }
        CloudCommand::Regions {
            command: RegionCommand::List { cloud },
        } => {
            let regions = regions(&client, cloud)?.list(Params::new()).await?;
            print!("{}", render::regions(&regions));
        }
        CloudCommand::Zones {
            command: ZoneCommand::List { cloud, region },
        } => {
            let zones = zones(&client, cloud, region)?.list(Params::new()).await?;
            print!("{}", render::zones(&zones));
        }
        CloudCommand::VmTypes {
            command: VmTypeCommand::List {
                cloud,
                region,
                zone,
            },
        } => {
            let vm_types = zones(&client, cloud, region)?
                .subroute("vm_types", Some(zone.into()))
                .ok_or_else(|| anyhow!("Zones have no vm_types route"))?
                .list(Params::new())
                .await?;
            print!("{}", render::vm_types(&vm_types));
        }
    }
    Ok(())
}

fn client() -> Result<ApiClient> {
    let store = ConfigStore::open_default()?;
    Ok(ApiClient::new(store.api_config())?)
}

fn regions(client: &ApiClient, cloud: String) -> Result<Endpoint> {
    client
        .clouds()
        .subroute("regions", Some(cloud.into()))
        .ok_or_else(|| anyhow!("Clouds have no regions route"))
}

fn zones(client: &ApiClient, cloud: String, region: String) -> Result<Endpoint> {
    regions(client, cloud)?
        .subroute("zones", Some(region.into()))
        .ok_or_else(|| anyhow!("Regions have no zones route"))
}

fn as_deployment(resource: &Resource) -> Result<Deployment<'_>> {
    Deployment::new(resource).ok_or_else(|| anyhow!("Expected a deployment, got {}", resource.kind()))
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Unable to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Loads credentials for `cloud_type` from `file`, or from the environment
/// when no file is given. Unreadable or malformed files yield `None`.
fn load_credentials(cloud_type: &str, file: Option<&Path>) -> Option<CloudCredentials> {
    let Some(path) = file else {
        return CloudCredentials::load_from_environment(cloud_type);
    };

    match read_json(path) {
        Ok(Value::Object(creds)) => CloudCredentials::load_from_dict(cloud_type, &creds),
        Ok(_) => {
            tracing::error!("Credentials file {} is not a JSON object", path.display());
            None
        }
        Err(e) => {
            tracing::error!("Unable to load credentials: {:#}", e);
            None
        }
    }
}
