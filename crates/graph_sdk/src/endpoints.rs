//! Azure AD Graph endpoint table.
//!
//! Every operation is scoped by `{tenantId}` (except the signed-in user
//! operations under `/me`) and requires `api-version`. List operations accept
//! the OData parameters `$filter`, `$top`, `$orderby` and `$skiptoken`.

use crate::descriptor::{Endpoint, HttpMethod, Param};

const TENANT: Param = Param::path("tenantId");
const API_VERSION: Param = Param::query("apiVersion", "api-version").required();
const FILTER: Param = Param::query("filter", "$filter");
const TOP: Param = Param::query("top", "$top");
const ORDERBY: Param = Param::query("orderby", "$orderby");
const SKIPTOKEN: Param = Param::query("skiptoken", "$skiptoken");
const REQUEST_ID: Param = Param::header("clientRequestId", "client-request-id");

const APPLICATION: Param = Param::path("applicationObjectId");
const SERVICE_PRINCIPAL: Param = Param::path("servicePrincipalObjectId");
const USER: Param = Param::path("userId");
const GROUP: Param = Param::path("groupObjectId");

const TENANT_PARAMS: &[Param] = &[TENANT, API_VERSION, REQUEST_ID];
const TENANT_LIST_PARAMS: &[Param] = &[TENANT, API_VERSION, FILTER, TOP, ORDERBY, SKIPTOKEN, REQUEST_ID];
const ME_PARAMS: &[Param] = &[API_VERSION, REQUEST_ID];

const APPLICATION_PARAMS: &[Param] = &[TENANT, APPLICATION, API_VERSION, REQUEST_ID];
const APPLICATION_LIST_PARAMS: &[Param] = &[TENANT, APPLICATION, API_VERSION, TOP, SKIPTOKEN, REQUEST_ID];
const SERVICE_PRINCIPAL_PARAMS: &[Param] = &[TENANT, SERVICE_PRINCIPAL, API_VERSION, REQUEST_ID];
const SERVICE_PRINCIPAL_LIST_PARAMS: &[Param] =
    &[TENANT, SERVICE_PRINCIPAL, API_VERSION, TOP, SKIPTOKEN, REQUEST_ID];
const USER_PARAMS: &[Param] = &[TENANT, USER, API_VERSION, REQUEST_ID];
const USER_LIST_PARAMS: &[Param] = &[TENANT, USER, API_VERSION, TOP, SKIPTOKEN, REQUEST_ID];
const GROUP_PARAMS: &[Param] = &[TENANT, GROUP, API_VERSION, REQUEST_ID];
const GROUP_LIST_PARAMS: &[Param] = &[TENANT, GROUP, API_VERSION, TOP, SKIPTOKEN, REQUEST_ID];

const fn endpoint(
    name: &'static str,
    method: HttpMethod,
    path: &'static str,
    params: &'static [Param],
) -> Endpoint {
    Endpoint {
        name,
        method,
        path,
        params,
    }
}

// Applications

/// List applications in the tenant.
pub const LIST_APPLICATIONS: Endpoint = endpoint(
    "listApplications",
    HttpMethod::Get,
    "/{tenantId}/applications",
    TENANT_LIST_PARAMS,
);
/// Create an application.
pub const CREATE_APPLICATION: Endpoint = endpoint(
    "createApplication",
    HttpMethod::Post,
    "/{tenantId}/applications",
    &[TENANT, API_VERSION, Param::body("application"), REQUEST_ID],
);
/// Get an application by object id.
pub const GET_APPLICATION: Endpoint = endpoint(
    "getApplication",
    HttpMethod::Get,
    "/{tenantId}/applications/{applicationObjectId}",
    APPLICATION_PARAMS,
);
/// Update an application.
pub const UPDATE_APPLICATION: Endpoint = endpoint(
    "updateApplication",
    HttpMethod::Patch,
    "/{tenantId}/applications/{applicationObjectId}",
    &[TENANT, APPLICATION, API_VERSION, Param::body("application"), REQUEST_ID],
);
/// Delete an application.
pub const DELETE_APPLICATION: Endpoint = endpoint(
    "deleteApplication",
    HttpMethod::Delete,
    "/{tenantId}/applications/{applicationObjectId}",
    APPLICATION_PARAMS,
);
/// List the owners of an application.
pub const LIST_APPLICATION_OWNERS: Endpoint = endpoint(
    "listApplicationOwners",
    HttpMethod::Get,
    "/{tenantId}/applications/{applicationObjectId}/owners",
    APPLICATION_LIST_PARAMS,
);
/// Add an owner to an application (body: `{"url": "<directory object url>"}`).
pub const ADD_APPLICATION_OWNER: Endpoint = endpoint(
    "addApplicationOwner",
    HttpMethod::Post,
    "/{tenantId}/applications/{applicationObjectId}/$links/owners",
    &[TENANT, APPLICATION, API_VERSION, Param::body("owner"), REQUEST_ID],
);
/// Remove an owner from an application.
pub const REMOVE_APPLICATION_OWNER: Endpoint = endpoint(
    "removeApplicationOwner",
    HttpMethod::Delete,
    "/{tenantId}/applications/{applicationObjectId}/$links/owners/{ownerObjectId}",
    &[TENANT, APPLICATION, Param::path("ownerObjectId"), API_VERSION, REQUEST_ID],
);
/// List the key credentials of an application.
pub const LIST_APPLICATION_KEY_CREDENTIALS: Endpoint = endpoint(
    "listApplicationKeyCredentials",
    HttpMethod::Get,
    "/{tenantId}/applications/{applicationObjectId}/keyCredentials",
    APPLICATION_PARAMS,
);
/// Replace the key credentials of an application.
pub const UPDATE_APPLICATION_KEY_CREDENTIALS: Endpoint = endpoint(
    "updateApplicationKeyCredentials",
    HttpMethod::Patch,
    "/{tenantId}/applications/{applicationObjectId}/keyCredentials",
    &[TENANT, APPLICATION, API_VERSION, Param::body("credentials"), REQUEST_ID],
);
/// List the password credentials of an application.
pub const LIST_APPLICATION_PASSWORD_CREDENTIALS: Endpoint = endpoint(
    "listApplicationPasswordCredentials",
    HttpMethod::Get,
    "/{tenantId}/applications/{applicationObjectId}/passwordCredentials",
    APPLICATION_PARAMS,
);
/// Replace the password credentials of an application.
pub const UPDATE_APPLICATION_PASSWORD_CREDENTIALS: Endpoint = endpoint(
    "updateApplicationPasswordCredentials",
    HttpMethod::Patch,
    "/{tenantId}/applications/{applicationObjectId}/passwordCredentials",
    &[TENANT, APPLICATION, API_VERSION, Param::body("credentials"), REQUEST_ID],
);
/// List the directory extension properties registered by an application.
pub const LIST_APPLICATION_EXTENSION_PROPERTIES: Endpoint = endpoint(
    "listApplicationExtensionProperties",
    HttpMethod::Get,
    "/{tenantId}/applications/{applicationObjectId}/extensionProperties",
    APPLICATION_PARAMS,
);
/// Register a directory extension property.
pub const CREATE_APPLICATION_EXTENSION_PROPERTY: Endpoint = endpoint(
    "createApplicationExtensionProperty",
    HttpMethod::Post,
    "/{tenantId}/applications/{applicationObjectId}/extensionProperties",
    &[TENANT, APPLICATION, API_VERSION, Param::body("extensionProperty"), REQUEST_ID],
);
/// Remove a directory extension property.
pub const DELETE_APPLICATION_EXTENSION_PROPERTY: Endpoint = endpoint(
    "deleteApplicationExtensionProperty",
    HttpMethod::Delete,
    "/{tenantId}/applications/{applicationObjectId}/extensionProperties/{extensionPropertyObjectId}",
    &[
        TENANT,
        APPLICATION,
        Param::path("extensionPropertyObjectId"),
        API_VERSION,
        REQUEST_ID,
    ],
);
/// List soft-deleted applications.
pub const LIST_DELETED_APPLICATIONS: Endpoint = endpoint(
    "listDeletedApplications",
    HttpMethod::Get,
    "/{tenantId}/deletedApplications",
    &[TENANT, API_VERSION, FILTER, REQUEST_ID],
);
/// Restore a soft-deleted application.
pub const RESTORE_DELETED_APPLICATION: Endpoint = endpoint(
    "restoreDeletedApplication",
    HttpMethod::Post,
    "/{tenantId}/deletedApplications/{applicationObjectId}/restore",
    APPLICATION_PARAMS,
);
/// Permanently delete a soft-deleted application.
pub const HARD_DELETE_APPLICATION: Endpoint = endpoint(
    "hardDeleteApplication",
    HttpMethod::Delete,
    "/{tenantId}/deletedApplications/{applicationObjectId}",
    APPLICATION_PARAMS,
);

// Service principals

/// List service principals in the tenant.
pub const LIST_SERVICE_PRINCIPALS: Endpoint = endpoint(
    "listServicePrincipals",
    HttpMethod::Get,
    "/{tenantId}/servicePrincipals",
    TENANT_LIST_PARAMS,
);
/// Create a service principal.
pub const CREATE_SERVICE_PRINCIPAL: Endpoint = endpoint(
    "createServicePrincipal",
    HttpMethod::Post,
    "/{tenantId}/servicePrincipals",
    &[TENANT, API_VERSION, Param::body("servicePrincipal"), REQUEST_ID],
);
/// Get a service principal by object id.
pub const GET_SERVICE_PRINCIPAL: Endpoint = endpoint(
    "getServicePrincipal",
    HttpMethod::Get,
    "/{tenantId}/servicePrincipals/{servicePrincipalObjectId}",
    SERVICE_PRINCIPAL_PARAMS,
);
/// Update a service principal.
pub const UPDATE_SERVICE_PRINCIPAL: Endpoint = endpoint(
    "updateServicePrincipal",
    HttpMethod::Patch,
    "/{tenantId}/servicePrincipals/{servicePrincipalObjectId}",
    &[
        TENANT,
        SERVICE_PRINCIPAL,
        API_VERSION,
        Param::body("servicePrincipal"),
        REQUEST_ID,
    ],
);
/// Delete a service principal.
pub const DELETE_SERVICE_PRINCIPAL: Endpoint = endpoint(
    "deleteServicePrincipal",
    HttpMethod::Delete,
    "/{tenantId}/servicePrincipals/{servicePrincipalObjectId}",
    SERVICE_PRINCIPAL_PARAMS,
);
/// List the owners of a service principal.
pub const LIST_SERVICE_PRINCIPAL_OWNERS: Endpoint = endpoint(
    "listServicePrincipalOwners",
    HttpMethod::Get,
    "/{tenantId}/servicePrincipals/{servicePrincipalObjectId}/owners",
    SERVICE_PRINCIPAL_LIST_PARAMS,
);
/// List app roles the service principal has been granted.
pub const LIST_SERVICE_PRINCIPAL_APP_ROLE_ASSIGNMENTS: Endpoint = endpoint(
    "listServicePrincipalAppRoleAssignments",
    HttpMethod::Get,
    "/{tenantId}/servicePrincipals/{servicePrincipalObjectId}/appRoleAssignments",
    SERVICE_PRINCIPAL_LIST_PARAMS,
);
/// List principals assigned to the service principal's app roles.
pub const LIST_SERVICE_PRINCIPAL_APP_ROLE_ASSIGNED_TO: Endpoint = endpoint(
    "listServicePrincipalAppRoleAssignedTo",
    HttpMethod::Get,
    "/{tenantId}/servicePrincipals/{servicePrincipalObjectId}/appRoleAssignedTo",
    SERVICE_PRINCIPAL_LIST_PARAMS,
);
/// List delegated permission grants issued to the service principal.
pub const LIST_SERVICE_PRINCIPAL_OAUTH2_PERMISSION_GRANTS: Endpoint = endpoint(
    "listServicePrincipalOAuth2PermissionGrants",
    HttpMethod::Get,
    "/{tenantId}/servicePrincipals/{servicePrincipalObjectId}/oauth2PermissionGrants",
    SERVICE_PRINCIPAL_LIST_PARAMS,
);
/// List the key credentials of a service principal.
pub const LIST_SERVICE_PRINCIPAL_KEY_CREDENTIALS: Endpoint = endpoint(
    "listServicePrincipalKeyCredentials",
    HttpMethod::Get,
    "/{tenantId}/servicePrincipals/{servicePrincipalObjectId}/keyCredentials",
    SERVICE_PRINCIPAL_PARAMS,
);
/// List the password credentials of a service principal.
pub const LIST_SERVICE_PRINCIPAL_PASSWORD_CREDENTIALS: Endpoint = endpoint(
    "listServicePrincipalPasswordCredentials",
    HttpMethod::Get,
    "/{tenantId}/servicePrincipals/{servicePrincipalObjectId}/passwordCredentials",
    SERVICE_PRINCIPAL_PARAMS,
);

// Users

/// List users in the tenant.
pub const LIST_USERS: Endpoint = endpoint(
    "listUsers",
    HttpMethod::Get,
    "/{tenantId}/users",
    TENANT_LIST_PARAMS,
);
/// Create a user.
pub const CREATE_USER: Endpoint = endpoint(
    "createUser",
    HttpMethod::Post,
    "/{tenantId}/users",
    &[TENANT, API_VERSION, Param::body("user"), REQUEST_ID],
);
/// Get a user by object id or user principal name.
pub const GET_USER: Endpoint = endpoint(
    "getUser",
    HttpMethod::Get,
    "/{tenantId}/users/{userId}",
    USER_PARAMS,
);
/// Update a user.
pub const UPDATE_USER: Endpoint = endpoint(
    "updateUser",
    HttpMethod::Patch,
    "/{tenantId}/users/{userId}",
    &[TENANT, USER, API_VERSION, Param::body("user"), REQUEST_ID],
);
/// Delete a user.
pub const DELETE_USER: Endpoint = endpoint(
    "deleteUser",
    HttpMethod::Delete,
    "/{tenantId}/users/{userId}",
    USER_PARAMS,
);
/// List groups and roles the user is a direct member of.
pub const LIST_USER_MEMBER_OF: Endpoint = endpoint(
    "listUserMemberOf",
    HttpMethod::Get,
    "/{tenantId}/users/{userId}/memberOf",
    USER_LIST_PARAMS,
);
/// Transitive group membership of a user.
pub const GET_USER_MEMBER_GROUPS: Endpoint = endpoint(
    "getUserMemberGroups",
    HttpMethod::Post,
    "/{tenantId}/users/{userId}/getMemberGroups",
    &[TENANT, USER, API_VERSION, Param::body("parameters"), REQUEST_ID],
);
/// List app role assignments of a user.
pub const LIST_USER_APP_ROLE_ASSIGNMENTS: Endpoint = endpoint(
    "listUserAppRoleAssignments",
    HttpMethod::Get,
    "/{tenantId}/users/{userId}/appRoleAssignments",
    USER_LIST_PARAMS,
);
/// List directory objects owned by a user.
pub const LIST_USER_OWNED_OBJECTS: Endpoint = endpoint(
    "listUserOwnedObjects",
    HttpMethod::Get,
    "/{tenantId}/users/{userId}/ownedObjects",
    USER_LIST_PARAMS,
);

// Groups

/// List groups in the tenant.
pub const LIST_GROUPS: Endpoint = endpoint(
    "listGroups",
    HttpMethod::Get,
    "/{tenantId}/groups",
    TENANT_LIST_PARAMS,
);
/// Create a group.
pub const CREATE_GROUP: Endpoint = endpoint(
    "createGroup",
    HttpMethod::Post,
    "/{tenantId}/groups",
    &[TENANT, API_VERSION, Param::body("group"), REQUEST_ID],
);
/// Get a group by object id.
pub const GET_GROUP: Endpoint = endpoint(
    "getGroup",
    HttpMethod::Get,
    "/{tenantId}/groups/{groupObjectId}",
    GROUP_PARAMS,
);
/// Delete a group.
pub const DELETE_GROUP: Endpoint = endpoint(
    "deleteGroup",
    HttpMethod::Delete,
    "/{tenantId}/groups/{groupObjectId}",
    GROUP_PARAMS,
);
/// List direct members of a group.
pub const LIST_GROUP_MEMBERS: Endpoint = endpoint(
    "listGroupMembers",
    HttpMethod::Get,
    "/{tenantId}/groups/{groupObjectId}/members",
    GROUP_LIST_PARAMS,
);
/// Add a member to a group (body: `{"url": "<directory object url>"}`).
pub const ADD_GROUP_MEMBER: Endpoint = endpoint(
    "addGroupMember",
    HttpMethod::Post,
    "/{tenantId}/groups/{groupObjectId}/$links/members",
    &[TENANT, GROUP, API_VERSION, Param::body("member"), REQUEST_ID],
);
/// Remove a member from a group.
pub const REMOVE_GROUP_MEMBER: Endpoint = endpoint(
    "removeGroupMember",
    HttpMethod::Delete,
    "/{tenantId}/groups/{groupObjectId}/$links/members/{memberObjectId}",
    &[TENANT, GROUP, Param::path("memberObjectId"), API_VERSION, REQUEST_ID],
);
/// Check whether a member belongs to a group, transitively.
pub const IS_MEMBER_OF: Endpoint = endpoint(
    "isMemberOf",
    HttpMethod::Post,
    "/{tenantId}/isMemberOf",
    &[TENANT, API_VERSION, Param::body("parameters"), REQUEST_ID],
);

// Directory objects

/// Get a directory object of any type.
pub const GET_DIRECTORY_OBJECT: Endpoint = endpoint(
    "getDirectoryObject",
    HttpMethod::Get,
    "/{tenantId}/directoryObjects/{objectId}",
    &[TENANT, Param::path("objectId"), API_VERSION, REQUEST_ID],
);
/// Resolve a batch of object ids.
pub const GET_OBJECTS_BY_OBJECT_IDS: Endpoint = endpoint(
    "getObjectsByObjectIds",
    HttpMethod::Post,
    "/{tenantId}/getObjectsByObjectIds",
    &[TENANT, API_VERSION, Param::body("parameters"), REQUEST_ID],
);

// OAuth2 permission grants

/// List delegated permission grants.
pub const LIST_OAUTH2_PERMISSION_GRANTS: Endpoint = endpoint(
    "listOAuth2PermissionGrants",
    HttpMethod::Get,
    "/{tenantId}/oauth2PermissionGrants",
    &[TENANT, API_VERSION, FILTER, TOP, SKIPTOKEN, REQUEST_ID],
);
/// Grant delegated permissions.
pub const CREATE_OAUTH2_PERMISSION_GRANT: Endpoint = endpoint(
    "createOAuth2PermissionGrant",
    HttpMethod::Post,
    "/{tenantId}/oauth2PermissionGrants",
    &[TENANT, API_VERSION, Param::body("grant"), REQUEST_ID],
);
/// Revoke a delegated permission grant.
pub const DELETE_OAUTH2_PERMISSION_GRANT: Endpoint = endpoint(
    "deleteOAuth2PermissionGrant",
    HttpMethod::Delete,
    "/{tenantId}/oauth2PermissionGrants/{objectId}",
    &[TENANT, Param::path("objectId"), API_VERSION, REQUEST_ID],
);

// Domains and tenant

/// List the tenant's domains.
pub const LIST_DOMAINS: Endpoint = endpoint(
    "listDomains",
    HttpMethod::Get,
    "/{tenantId}/domains",
    &[TENANT, API_VERSION, FILTER, REQUEST_ID],
);
/// Get a domain by name.
pub const GET_DOMAIN: Endpoint = endpoint(
    "getDomain",
    HttpMethod::Get,
    "/{tenantId}/domains/{domainName}",
    &[TENANT, Param::path("domainName"), API_VERSION, REQUEST_ID],
);
/// Get the tenant details.
pub const GET_TENANT_DETAILS: Endpoint = endpoint(
    "getTenantDetails",
    HttpMethod::Get,
    "/{tenantId}/tenantDetails",
    TENANT_PARAMS,
);

// Signed-in user

/// Get the signed-in user.
pub const GET_SIGNED_IN_USER: Endpoint =
    endpoint("getSignedInUser", HttpMethod::Get, "/me", ME_PARAMS);
/// List directory objects owned by the signed-in user.
pub const LIST_SIGNED_IN_USER_OWNED_OBJECTS: Endpoint = endpoint(
    "listSignedInUserOwnedObjects",
    HttpMethod::Get,
    "/me/ownedObjects",
    &[API_VERSION, TOP, SKIPTOKEN, REQUEST_ID],
);

static ENDPOINTS: &[&Endpoint] = &[
    &LIST_APPLICATIONS,
    &CREATE_APPLICATION,
    &GET_APPLICATION,
    &UPDATE_APPLICATION,
    &DELETE_APPLICATION,
    &LIST_APPLICATION_OWNERS,
    &ADD_APPLICATION_OWNER,
    &REMOVE_APPLICATION_OWNER,
    &LIST_APPLICATION_KEY_CREDENTIALS,
    &UPDATE_APPLICATION_KEY_CREDENTIALS,
    &LIST_APPLICATION_PASSWORD_CREDENTIALS,
    &UPDATE_APPLICATION_PASSWORD_CREDENTIALS,
    &LIST_APPLICATION_EXTENSION_PROPERTIES,
    &CREATE_APPLICATION_EXTENSION_PROPERTY,
    &DELETE_APPLICATION_EXTENSION_PROPERTY,
    &LIST_DELETED_APPLICATIONS,
    &RESTORE_DELETED_APPLICATION,
    &HARD_DELETE_APPLICATION,
    &LIST_SERVICE_PRINCIPALS,
    &CREATE_SERVICE_PRINCIPAL,
    &GET_SERVICE_PRINCIPAL,
    &UPDATE_SERVICE_PRINCIPAL,
    &DELETE_SERVICE_PRINCIPAL,
    &LIST_SERVICE_PRINCIPAL_OWNERS,
    &LIST_SERVICE_PRINCIPAL_APP_ROLE_ASSIGNMENTS,
    &LIST_SERVICE_PRINCIPAL_APP_ROLE_ASSIGNED_TO,
    &LIST_SERVICE_PRINCIPAL_OAUTH2_PERMISSION_GRANTS,
    &LIST_SERVICE_PRINCIPAL_KEY_CREDENTIALS,
    &LIST_SERVICE_PRINCIPAL_PASSWORD_CREDENTIALS,
    &LIST_USERS,
    &CREATE_USER,
    &GET_USER,
    &UPDATE_USER,
    &DELETE_USER,
    &LIST_USER_MEMBER_OF,
    &GET_USER_MEMBER_GROUPS,
    &LIST_USER_APP_ROLE_ASSIGNMENTS,
    &LIST_USER_OWNED_OBJECTS,
    &LIST_GROUPS,
    &CREATE_GROUP,
    &GET_GROUP,
    &DELETE_GROUP,
    &LIST_GROUP_MEMBERS,
    &ADD_GROUP_MEMBER,
    &REMOVE_GROUP_MEMBER,
    &IS_MEMBER_OF,
    &GET_DIRECTORY_OBJECT,
    &GET_OBJECTS_BY_OBJECT_IDS,
    &LIST_OAUTH2_PERMISSION_GRANTS,
    &CREATE_OAUTH2_PERMISSION_GRANT,
    &DELETE_OAUTH2_PERMISSION_GRANT,
    &LIST_DOMAINS,
    &GET_DOMAIN,
    &GET_TENANT_DETAILS,
    &GET_SIGNED_IN_USER,
    &LIST_SIGNED_IN_USER_OWNED_OBJECTS,
];

/// Every known endpoint.
pub fn all() -> &'static [&'static Endpoint] {
    ENDPOINTS
}

/// Find an endpoint by operation name.
pub fn find(name: &str) -> Option<&'static Endpoint> {
    ENDPOINTS.iter().copied().find(|endpoint| endpoint.name == name)
}
