//! S3 kinds: Bucket, Object, and the canned ACL enumeration.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use groundwork_core::{
    ArgBundle, DefinitionError, FieldSpec, Resource, ResourceId, ResourceType, ValueKind,
};
use groundwork_graph::Deployment;

/// The canned access-control lists S3 predefines.
///
/// A closed set of stable tag values; no validation or graph behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CannedAcl {
    AwsExecRead,
    AuthenticatedRead,
    BucketOwnerFullControl,
    BucketOwnerRead,
    LogDeliveryWrite,
    Private,
    PublicRead,
    PublicReadWrite,
}

impl CannedAcl {
    /// The wire form of the ACL value.
    pub fn as_str(&self) -> &'static str {
        match self {
            CannedAcl::AwsExecRead => "aws-exec-read",
            CannedAcl::AuthenticatedRead => "authenticated-read",
            CannedAcl::BucketOwnerFullControl => "bucket-owner-full-control",
            CannedAcl::BucketOwnerRead => "bucket-owner-read",
            CannedAcl::LogDeliveryWrite => "log-delivery-write",
            CannedAcl::Private => "private",
            CannedAcl::PublicRead => "public-read",
            CannedAcl::PublicReadWrite => "public-read-write",
        }
    }
}

impl fmt::Display for CannedAcl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static BUCKET_TYPE: LazyLock<ResourceType> = LazyLock::new(|| {
    ResourceType::new(
        "aws:s3/bucket:Bucket",
        vec![
            FieldSpec::required("name", ValueKind::Scalar),
            FieldSpec::optional("bucketName", ValueKind::Scalar),
            FieldSpec::optional("accessControl", ValueKind::Scalar).mutable(),
        ],
    )
});

/// Arguments for constructing a [`Bucket`].
#[derive(Debug, Clone)]
pub struct BucketArgs {
    pub name: String,
    pub bucket_name: Option<String>,
    pub access_control: Option<CannedAcl>,
}

/// An S3 bucket.
#[derive(Debug)]
pub struct Bucket {
    id: ResourceId,
    name: String,
    bucket_name: Option<String>,
    access_control: Option<CannedAcl>,
}

impl Bucket {
    pub fn new(deployment: &Deployment, args: BucketArgs) -> Result<Self, DefinitionError> {
        let bundle = ArgBundle::new()
            .set("name", args.name.clone())
            .maybe("bucketName", args.bucket_name.clone())
            .maybe("accessControl", args.access_control.map(|acl| acl.as_str()));
        let id = deployment.define(&BUCKET_TYPE, &args.name, bundle)?;
        Ok(Bucket {
            id,
            name: args.name,
            bucket_name: args.bucket_name,
            access_control: args.access_control,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bucket_name(&self) -> Option<&str> {
        self.bucket_name.as_deref()
    }

    pub fn access_control(&self) -> Option<CannedAcl> {
        self.access_control
    }

    pub fn set_access_control(&mut self, value: Option<CannedAcl>) {
        self.access_control = value;
    }
}

impl Resource for Bucket {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn resource_type(&self) -> &'static ResourceType {
        LazyLock::force(&BUCKET_TYPE)
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

static OBJECT_TYPE: LazyLock<ResourceType> = LazyLock::new(|| {
    ResourceType::new(
        "aws:s3/object:Object",
        vec![
            FieldSpec::required("key", ValueKind::Scalar),
            FieldSpec::required("bucket", ValueKind::ResourceRef),
            FieldSpec::optional("source", ValueKind::Opaque).mutable(),
        ],
    )
});

/// Arguments for constructing an [`Object`].
#[derive(Debug, Clone)]
pub struct ObjectArgs<'a> {
    pub key: String,
    pub bucket: &'a Bucket,
    /// Content source (inline data or a file reference).
    pub source: Option<serde_json::Value>,
}

/// An object stored in a [`Bucket`].
#[derive(Debug)]
pub struct Object {
    id: ResourceId,
    key: String,
    bucket: ResourceId,
    source: Option<serde_json::Value>,
}

impl Object {
    pub fn new(deployment: &Deployment, args: ObjectArgs<'_>) -> Result<Self, DefinitionError> {
        let bundle = ArgBundle::new()
            .set("key", args.key.clone())
            .set("bucket", args.bucket.id())
            .maybe("source", args.source.clone());
        let id = deployment.define(&OBJECT_TYPE, &args.key, bundle)?;
        Ok(Object {
            id,
            key: args.key,
            bucket: args.bucket.id(),
            source: args.source,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn bucket(&self) -> ResourceId {
        self.bucket
    }

    pub fn source(&self) -> Option<&serde_json::Value> {
        self.source.as_ref()
    }

    pub fn set_source(&mut self, value: Option<serde_json::Value>) {
        self.source = value;
    }
}

impl Resource for Object {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn resource_type(&self) -> &'static ResourceType {
        LazyLock::force(&OBJECT_TYPE)
    }

    fn display_name(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_acl_values_are_stable_and_distinct() {
        let all = [
            CannedAcl::AwsExecRead,
            CannedAcl::AuthenticatedRead,
            CannedAcl::BucketOwnerFullControl,
            CannedAcl::BucketOwnerRead,
            CannedAcl::LogDeliveryWrite,
            CannedAcl::Private,
            CannedAcl::PublicRead,
            CannedAcl::PublicReadWrite,
        ];
        let strings: Vec<_> = all.iter().map(|a| a.as_str()).collect();
        for (i, s) in strings.iter().enumerate() {
            // Stable across repeated reads.
            assert_eq!(*s, all[i].as_str());
            // Distinct from every other value.
            for (j, t) in strings.iter().enumerate() {
                if i != j {
                    assert_ne!(s, t);
                }
            }
        }
        assert_eq!(CannedAcl::Private.as_str(), "private");
        assert_eq!(
            CannedAcl::BucketOwnerFullControl.as_str(),
            "bucket-owner-full-control"
        );
    }

    #[test]
    fn canned_acl_serde_matches_wire_form() {
        let json = serde_json::to_string(&CannedAcl::PublicRead).unwrap();
        assert_eq!(json, "\"public-read\"");
        let back: CannedAcl = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CannedAcl::PublicRead);
    }

    #[test]
    fn object_depends_on_its_bucket() {
        let deployment = Deployment::new();
        let bucket = Bucket::new(
            &deployment,
            BucketArgs {
                name: "artifacts".to_string(),
                bucket_name: None,
                access_control: Some(CannedAcl::Private),
            },
        )
        .unwrap();
        let object = Object::new(
            &deployment,
            ObjectArgs {
                key: "build/app.zip".to_string(),
                bucket: &bucket,
                source: None,
            },
        )
        .unwrap();

        let snap = deployment.snapshot();
        assert_eq!(snap.dependencies_of(object.id()), vec![bucket.id()]);
        let record = snap.resource(bucket.id()).unwrap();
        assert_eq!(record.kind, "aws:s3/bucket:Bucket");
    }
}
