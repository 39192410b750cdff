//! Wire request validation

use super::types::{AttributeReverseMapping, EntityReverseMapping};
use crate::error::{Error, Result};
use crate::framework::{self, ConnectorInfo, DatasourceAuthCredentials, Request};
use crate::types::OptionStringExt;
use crate::wire::{self, GetPageRequest};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::debug;

/// Validate a wire request and translate it for an adapter
///
/// Returns the adapter-facing request together with the reverse mapping of
/// its entity tree. Errors are request-shape errors: invalid page request,
/// invalid datasource or invalid entity config.
pub fn validate_get_page_request<Config: DeserializeOwned>(
    request: &GetPageRequest,
) -> Result<(Request<Config>, EntityReverseMapping)> {
    let Some(datasource) = &request.datasource else {
        return Err(Error::invalid_request("Request is missing a datasource config."));
    };
    let Some(entity) = &request.entity else {
        return Err(Error::invalid_request("Request is missing an entity config."));
    };
    if request.page_size <= 0 {
        return Err(Error::invalid_request(format!(
            "Request page size must be greater than 0, got {}.",
            request.page_size
        )));
    }

    if datasource.id.is_empty() {
        return Err(Error::invalid_datasource(
            "Datasource config is missing an id.",
        ));
    }
    let config = parse_datasource_config(datasource)?;

    let (entity_config, mapping) = validate_entity_config(entity)?;

    debug!(
        datasource_id = %datasource.id,
        entity_id = %entity.id,
        entity_external_id = %entity.external_id,
        page_size = request.page_size,
        "Validated page request"
    );

    let request = Request {
        datasource_id: datasource.id.clone(),
        address: datasource.address.clone().none_if_empty(),
        auth: datasource.auth.as_ref().map(translate_auth),
        config,
        datasource_type: datasource.datasource_type.clone(),
        connector_info: datasource.connector_info.as_ref().map(|info| ConnectorInfo {
            id: info.id.clone(),
            client_id: info.client_id.clone(),
        }),
        ordered: entity_config.ordered,
        entity: entity_config,
        page_size: request.page_size,
        cursor: request.cursor.clone().none_if_empty(),
    };

    Ok((request, mapping))
}

fn parse_datasource_config<Config: DeserializeOwned>(
    datasource: &wire::DatasourceConfig,
) -> Result<Option<Config>> {
    if datasource.config.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(&datasource.config)
        .map(Some)
        .map_err(|e| {
            Error::invalid_datasource(format!(
                "Datasource {} config could not be parsed: {e}.",
                datasource.id
            ))
        })
}

fn translate_auth(auth: &wire::DatasourceAuthCredentials) -> DatasourceAuthCredentials {
    match auth {
        wire::DatasourceAuthCredentials::Basic(basic) => DatasourceAuthCredentials::Basic {
            username: basic.username.clone(),
            password: basic.password.clone(),
        },
        wire::DatasourceAuthCredentials::HttpAuthorization(value) => {
            DatasourceAuthCredentials::HttpAuthorization(value.clone())
        }
    }
}

/// Validate a wire entity tree
///
/// Builds the adapter-facing entity and its reverse mapping together,
/// depth-first. Each child entity is fully checked against its siblings
/// before its own schema is validated.
pub fn validate_entity_config(
    entity: &wire::EntityConfig,
) -> Result<(framework::EntityConfig, EntityReverseMapping)> {
    let describe = || {
        format!(
            "Entity (id: {:?}, external id: {:?})",
            entity.id, entity.external_id
        )
    };

    if entity.id.is_empty() {
        return Err(Error::invalid_entity(format!("{} is missing an id.", describe())));
    }
    if entity.external_id.is_empty() {
        return Err(Error::invalid_entity(format!(
            "{} is missing an external id.",
            describe()
        )));
    }
    if entity.attributes.is_empty() {
        return Err(Error::invalid_entity(format!(
            "{} has no attributes.",
            describe()
        )));
    }

    let mut config = framework::EntityConfig {
        external_id: entity.external_id.clone(),
        ordered: entity.ordered,
        attributes: Vec::with_capacity(entity.attributes.len()),
        child_entities: Vec::with_capacity(entity.child_entities.len()),
    };
    let mut mapping = EntityReverseMapping {
        id: entity.id.clone(),
        external_id: entity.external_id.clone(),
        ..Default::default()
    };

    // Attribute and child-entity ids are separate namespaces; external ids are shared.
    let mut attribute_ids = HashSet::new();
    for attribute in &entity.attributes {
        if attribute.id.is_empty() {
            return Err(Error::invalid_entity(format!(
                "{} has an attribute (external id: {:?}) that is missing an id.",
                describe(),
                attribute.external_id
            )));
        }
        if attribute.external_id.is_empty() {
            return Err(Error::invalid_entity(format!(
                "{} has an attribute (id: {:?}) that is missing an external id.",
                describe(),
                attribute.id
            )));
        }
        if !attribute.attribute_type.is_specified() {
            return Err(Error::invalid_entity(format!(
                "{} has an attribute (id: {:?}, external id: {:?}) with an unspecified type.",
                describe(),
                attribute.id,
                attribute.external_id
            )));
        }
        if !attribute_ids.insert(attribute.id.as_str()) {
            return Err(Error::invalid_entity(format!(
                "{} has multiple attributes with id {:?}.",
                describe(),
                attribute.id
            )));
        }
        if mapping.attributes.contains_key(&attribute.external_id) {
            return Err(Error::invalid_entity(format!(
                "{} has multiple attributes with external id {:?}.",
                describe(),
                attribute.external_id
            )));
        }

        config.attributes.push(framework::AttributeConfig {
            external_id: attribute.external_id.clone(),
            attribute_type: attribute.attribute_type,
            list: attribute.list,
            unique_id: attribute.unique_id,
        });
        mapping.attributes.insert(
            attribute.external_id.clone(),
            AttributeReverseMapping {
                id: attribute.id.clone(),
                attribute_type: attribute.attribute_type,
                list: attribute.list,
            },
        );
    }

    let mut child_ids = HashSet::new();
    for child in &entity.child_entities {
        if child.id.is_empty() {
            return Err(Error::invalid_entity(format!(
                "{} has a child entity (external id: {:?}) that is missing an id.",
                describe(),
                child.external_id
            )));
        }
        if child.external_id.is_empty() {
            return Err(Error::invalid_entity(format!(
                "{} has a child entity (id: {:?}) that is missing an external id.",
                describe(),
                child.id
            )));
        }
        if !child_ids.insert(child.id.as_str()) {
            return Err(Error::invalid_entity(format!(
                "{} has multiple child entities with id {:?}.",
                describe(),
                child.id
            )));
        }
        if mapping.child_entities.contains_key(&child.external_id) {
            return Err(Error::invalid_entity(format!(
                "{} has multiple child entities with external id {:?}.",
                describe(),
                child.external_id
            )));
        }
        if mapping.attributes.contains_key(&child.external_id) {
            return Err(Error::invalid_entity(format!(
                "{} has a child entity and an attribute with the same external id {:?}.",
                describe(),
                child.external_id
            )));
        }

        let (child_config, child_mapping) = validate_entity_config(child)?;
        config.child_entities.push(child_config);
        mapping
            .child_entities
            .insert(child.external_id.clone(), child_mapping);
    }

    Ok((config, mapping))
}
