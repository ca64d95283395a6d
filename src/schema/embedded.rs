//! Embedded standard LDAP schemas.
//!
//! This module provides the standard schemas (RFC 4512, RFC 4519, RFC 4524,
//! RFC 2798 and RFC 2307) as JSON bundles embedded as static strings, so a
//! schema manager can be bootstrapped without external schema files.
//!
//! `system` holds the executables, syntaxes and matching rules every other
//! schema builds on, plus the operational attributes. `nis` ships disabled.

/// Returns the `system` schema bundle as a JSON string.
pub fn system_schema() -> &'static str {
    r#"{
  "name": "system",
  "dependencies": [],
  "comparators": [
    {"oid": "2.5.13.0", "implementation": "StringComparator"},
    {"oid": "2.5.13.1", "implementation": "StringComparator"},
    {"oid": "2.5.13.2", "implementation": "StringComparator"},
    {"oid": "2.5.13.3", "implementation": "StringComparator"},
    {"oid": "2.5.13.4", "implementation": "StringComparator"},
    {"oid": "2.5.13.5", "implementation": "StringComparator"},
    {"oid": "2.5.13.8", "implementation": "StringComparator"},
    {"oid": "2.5.13.13", "implementation": "BooleanComparator"},
    {"oid": "2.5.13.14", "implementation": "IntegerComparator"},
    {"oid": "2.5.13.15", "implementation": "IntegerComparator"},
    {"oid": "2.5.13.17", "implementation": "ByteArrayComparator"},
    {"oid": "2.5.13.20", "implementation": "StringComparator"},
    {"oid": "2.5.13.27", "implementation": "GeneralizedTimeComparator"},
    {"oid": "2.5.13.28", "implementation": "GeneralizedTimeComparator"},
    {"oid": "1.3.6.1.4.1.1466.109.114.1", "implementation": "StringComparator"},
    {"oid": "1.3.6.1.4.1.1466.109.114.2", "implementation": "StringComparator"},
    {"oid": "1.3.6.1.1.16.2", "implementation": "StringComparator"}
  ],
  "normalizers": [
    {"oid": "2.5.13.0", "implementation": "ObjectIdentifierNormalizer"},
    {"oid": "2.5.13.1", "implementation": "DnNormalizer"},
    {"oid": "2.5.13.2", "implementation": "DeepTrimToLowerNormalizer"},
    {"oid": "2.5.13.3", "implementation": "DeepTrimToLowerNormalizer"},
    {"oid": "2.5.13.4", "implementation": "DeepTrimToLowerNormalizer"},
    {"oid": "2.5.13.5", "implementation": "DeepTrimNormalizer"},
    {"oid": "2.5.13.8", "implementation": "NumericNormalizer"},
    {"oid": "2.5.13.13", "implementation": "BooleanNormalizer"},
    {"oid": "2.5.13.14", "implementation": "IntegerNormalizer"},
    {"oid": "2.5.13.15", "implementation": "IntegerNormalizer"},
    {"oid": "2.5.13.17", "implementation": "NoOpNormalizer"},
    {"oid": "2.5.13.20", "implementation": "TelephoneNumberNormalizer"},
    {"oid": "2.5.13.27", "implementation": "GeneralizedTimeNormalizer"},
    {"oid": "2.5.13.28", "implementation": "GeneralizedTimeNormalizer"},
    {"oid": "1.3.6.1.4.1.1466.109.114.1", "implementation": "DeepTrimNormalizer"},
    {"oid": "1.3.6.1.4.1.1466.109.114.2", "implementation": "DeepTrimToLowerNormalizer"},
    {"oid": "1.3.6.1.1.16.2", "implementation": "UuidNormalizer"}
  ],
  "syntaxCheckers": [
    {"oid": "1.3.6.1.4.1.1466.115.121.1.5", "implementation": "BinarySyntaxChecker"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.7", "implementation": "BooleanSyntaxChecker"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.11", "implementation": "CountryStringSyntaxChecker"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.12", "implementation": "DnSyntaxChecker"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.15", "implementation": "DirectoryStringSyntaxChecker"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.24", "implementation": "GeneralizedTimeSyntaxChecker"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.26", "implementation": "Ia5StringSyntaxChecker"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.27", "implementation": "IntegerSyntaxChecker"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.28", "implementation": "BinarySyntaxChecker"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.36", "implementation": "NumericStringSyntaxChecker"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.38", "implementation": "OidSyntaxChecker"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.40", "implementation": "OctetStringSyntaxChecker"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.44", "implementation": "PrintableStringSyntaxChecker"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.50", "implementation": "TelephoneNumberSyntaxChecker"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.58", "implementation": "DirectoryStringSyntaxChecker"},
    {"oid": "1.3.6.1.1.16.1", "implementation": "UuidSyntaxChecker"}
  ],
  "ldapSyntaxes": [
    {"oid": "1.3.6.1.4.1.1466.115.121.1.5", "description": "Binary", "humanReadable": false},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.7", "description": "Boolean"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.11", "description": "Country String"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.12", "description": "DN"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.15", "description": "Directory String"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.24", "description": "Generalized Time"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.26", "description": "IA5 String"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.27", "description": "INTEGER"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.28", "description": "JPEG", "humanReadable": false},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.36", "description": "Numeric String"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.38", "description": "OID"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.40", "description": "Octet String", "humanReadable": false},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.44", "description": "Printable String"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.50", "description": "Telephone Number"},
    {"oid": "1.3.6.1.4.1.1466.115.121.1.58", "description": "Substring Assertion"},
    {"oid": "1.3.6.1.1.16.1", "description": "UUID"}
  ],
  "matchingRules": [
    {"oid": "2.5.13.0", "names": ["objectIdentifierMatch"], "syntax": "1.3.6.1.4.1.1466.115.121.1.38"},
    {"oid": "2.5.13.1", "names": ["distinguishedNameMatch"], "syntax": "1.3.6.1.4.1.1466.115.121.1.12"},
    {"oid": "2.5.13.2", "names": ["caseIgnoreMatch"], "syntax": "1.3.6.1.4.1.1466.115.121.1.15"},
    {"oid": "2.5.13.3", "names": ["caseIgnoreOrderingMatch"], "syntax": "1.3.6.1.4.1.1466.115.121.1.15"},
    {"oid": "2.5.13.4", "names": ["caseIgnoreSubstringsMatch"], "syntax": "1.3.6.1.4.1.1466.115.121.1.58"},
    {"oid": "2.5.13.5", "names": ["caseExactMatch"], "syntax": "1.3.6.1.4.1.1466.115.121.1.15"},
    {"oid": "2.5.13.8", "names": ["numericStringMatch"], "syntax": "1.3.6.1.4.1.1466.115.121.1.36"},
    {"oid": "2.5.13.13", "names": ["booleanMatch"], "syntax": "1.3.6.1.4.1.1466.115.121.1.7"},
    {"oid": "2.5.13.14", "names": ["integerMatch"], "syntax": "1.3.6.1.4.1.1466.115.121.1.27"},
    {"oid": "2.5.13.15", "names": ["integerOrderingMatch"], "syntax": "1.3.6.1.4.1.1466.115.121.1.27"},
    {"oid": "2.5.13.17", "names": ["octetStringMatch"], "syntax": "1.3.6.1.4.1.1466.115.121.1.40"},
    {"oid": "2.5.13.20", "names": ["telephoneNumberMatch"], "syntax": "1.3.6.1.4.1.1466.115.121.1.50"},
    {"oid": "2.5.13.27", "names": ["generalizedTimeMatch"], "syntax": "1.3.6.1.4.1.1466.115.121.1.24"},
    {"oid": "2.5.13.28", "names": ["generalizedTimeOrderingMatch"], "syntax": "1.3.6.1.4.1.1466.115.121.1.24"},
    {"oid": "1.3.6.1.4.1.1466.109.114.1", "names": ["caseExactIA5Match"], "syntax": "1.3.6.1.4.1.1466.115.121.1.26"},
    {"oid": "1.3.6.1.4.1.1466.109.114.2", "names": ["caseIgnoreIA5Match"], "syntax": "1.3.6.1.4.1.1466.115.121.1.26"},
    {"oid": "1.3.6.1.1.16.2", "names": ["uuidMatch"], "syntax": "1.3.6.1.1.16.1"}
  ],
  "attributeTypes": [
    {
      "oid": "2.5.4.0",
      "names": ["objectClass"],
      "description": "RFC4512: object classes of the entity",
      "equality": "objectIdentifierMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.38"
    },
    {
      "oid": "2.5.4.1",
      "names": ["aliasedObjectName", "aliasedEntryName"],
      "equality": "distinguishedNameMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.12",
      "singleValue": true
    },
    {
      "oid": "2.5.4.41",
      "names": ["name"],
      "equality": "caseIgnoreMatch",
      "substring": "caseIgnoreSubstringsMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.15",
      "syntaxLength": 32768
    },
    {
      "oid": "2.5.4.3",
      "names": ["cn", "commonName"],
      "description": "RFC4519: common name(s) for which the entity is known by",
      "superior": "name"
    },
    {
      "oid": "2.5.18.1",
      "names": ["createTimestamp"],
      "equality": "generalizedTimeMatch",
      "ordering": "generalizedTimeOrderingMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.24",
      "singleValue": true,
      "noUserModification": true,
      "usage": "directoryOperation"
    },
    {
      "oid": "2.5.18.2",
      "names": ["modifyTimestamp"],
      "equality": "generalizedTimeMatch",
      "ordering": "generalizedTimeOrderingMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.24",
      "singleValue": true,
      "noUserModification": true,
      "usage": "directoryOperation"
    },
    {
      "oid": "2.5.18.3",
      "names": ["creatorsName"],
      "equality": "distinguishedNameMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.12",
      "singleValue": true,
      "noUserModification": true,
      "usage": "directoryOperation"
    },
    {
      "oid": "2.5.18.4",
      "names": ["modifiersName"],
      "equality": "distinguishedNameMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.12",
      "singleValue": true,
      "noUserModification": true,
      "usage": "directoryOperation"
    },
    {
      "oid": "1.3.6.1.1.16.4",
      "names": ["entryUUID"],
      "description": "UUID of the entry",
      "equality": "uuidMatch",
      "syntax": "1.3.6.1.1.16.1",
      "singleValue": true,
      "noUserModification": true,
      "usage": "directoryOperation"
    }
  ],
  "objectClasses": [
    {
      "oid": "2.5.6.0",
      "names": ["top"],
      "description": "top of the superclass chain",
      "kind": "abstract",
      "must": ["objectClass"]
    },
    {
      "oid": "2.5.6.1",
      "names": ["alias"],
      "superiors": ["top"],
      "must": ["aliasedObjectName"]
    },
    {
      "oid": "1.3.6.1.4.1.1466.101.120.111",
      "names": ["extensibleObject"],
      "description": "RFC4512: extensible object",
      "kind": "auxiliary",
      "superiors": ["top"]
    }
  ]
}"#
}

/// Returns the `core` schema bundle (RFC 4519) as a JSON string.
pub fn core_schema() -> &'static str {
    r#"{
  "name": "core",
  "dependencies": ["system"],
  "attributeTypes": [
    {"oid": "2.5.4.4", "names": ["sn", "surname"], "superior": "name"},
    {
      "oid": "2.5.4.35",
      "names": ["userPassword"],
      "equality": "octetStringMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.40",
      "syntaxLength": 128
    },
    {
      "oid": "2.5.4.20",
      "names": ["telephoneNumber"],
      "equality": "telephoneNumberMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.50",
      "syntaxLength": 32
    },
    {
      "oid": "2.5.4.49",
      "names": ["distinguishedName"],
      "equality": "distinguishedNameMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.12"
    },
    {"oid": "2.5.4.34", "names": ["seeAlso"], "superior": "distinguishedName"},
    {
      "oid": "2.5.4.13",
      "names": ["description"],
      "equality": "caseIgnoreMatch",
      "substring": "caseIgnoreSubstringsMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.15",
      "syntaxLength": 1024
    },
    {"oid": "2.5.4.10", "names": ["o", "organizationName"], "superior": "name"},
    {"oid": "2.5.4.11", "names": ["ou", "organizationalUnitName"], "superior": "name"},
    {"oid": "2.5.4.12", "names": ["title"], "superior": "name"},
    {"oid": "2.5.4.7", "names": ["l", "localityName"], "superior": "name"},
    {"oid": "2.5.4.8", "names": ["st", "stateOrProvinceName"], "superior": "name"},
    {
      "oid": "2.5.4.9",
      "names": ["street", "streetAddress"],
      "equality": "caseIgnoreMatch",
      "substring": "caseIgnoreSubstringsMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.15",
      "syntaxLength": 128
    },
    {
      "oid": "2.5.4.6",
      "names": ["c", "countryName"],
      "superior": "name",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.11",
      "singleValue": true
    },
    {"oid": "2.5.4.42", "names": ["givenName", "gn"], "superior": "name"},
    {"oid": "2.5.4.43", "names": ["initials"], "superior": "name"},
    {
      "oid": "0.9.2342.19200300.100.1.25",
      "names": ["dc", "domainComponent"],
      "equality": "caseIgnoreIA5Match",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.26",
      "singleValue": true
    }
  ],
  "objectClasses": [
    {
      "oid": "2.5.6.6",
      "names": ["person"],
      "superiors": ["top"],
      "must": ["sn", "cn"],
      "may": ["userPassword", "telephoneNumber", "seeAlso", "description"]
    },
    {
      "oid": "2.5.6.7",
      "names": ["organizationalPerson"],
      "superiors": ["person"],
      "may": ["title", "ou", "l", "st", "street"]
    },
    {
      "oid": "2.5.6.4",
      "names": ["organization"],
      "superiors": ["top"],
      "must": ["o"],
      "may": ["userPassword", "seeAlso", "telephoneNumber", "street", "st", "l", "description"]
    },
    {
      "oid": "2.5.6.5",
      "names": ["organizationalUnit"],
      "superiors": ["top"],
      "must": ["ou"],
      "may": ["userPassword", "seeAlso", "telephoneNumber", "street", "st", "l", "description"]
    },
    {
      "oid": "2.5.6.2",
      "names": ["country"],
      "superiors": ["top"],
      "must": ["c"],
      "may": ["description"]
    },
    {
      "oid": "1.3.6.1.4.1.1466.344",
      "names": ["dcObject"],
      "kind": "auxiliary",
      "superiors": ["top"],
      "must": ["dc"]
    }
  ]
}"#
}

/// Returns the `cosine` schema bundle (RFC 4524) as a JSON string.
pub fn cosine_schema() -> &'static str {
    r#"{
  "name": "cosine",
  "dependencies": ["system", "core"],
  "attributeTypes": [
    {
      "oid": "0.9.2342.19200300.100.1.1",
      "names": ["uid", "userid"],
      "equality": "caseIgnoreMatch",
      "substring": "caseIgnoreSubstringsMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.15",
      "syntaxLength": 256
    },
    {
      "oid": "0.9.2342.19200300.100.1.3",
      "names": ["mail", "rfc822Mailbox"],
      "equality": "caseIgnoreIA5Match",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.26",
      "syntaxLength": 256
    },
    {
      "oid": "0.9.2342.19200300.100.1.20",
      "names": ["homePhone", "homeTelephoneNumber"],
      "equality": "telephoneNumberMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.50"
    },
    {
      "oid": "0.9.2342.19200300.100.1.41",
      "names": ["mobile", "mobileTelephoneNumber"],
      "equality": "telephoneNumberMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.50"
    },
    {
      "oid": "0.9.2342.19200300.100.1.10",
      "names": ["manager"],
      "equality": "distinguishedNameMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.12"
    }
  ],
  "objectClasses": [
    {
      "oid": "0.9.2342.19200300.100.4.5",
      "names": ["account"],
      "superiors": ["top"],
      "must": ["uid"],
      "may": ["description", "seeAlso", "l", "o", "ou"]
    },
    {
      "oid": "0.9.2342.19200300.100.4.13",
      "names": ["domain"],
      "superiors": ["top"],
      "must": ["dc"],
      "may": ["userPassword", "seeAlso", "telephoneNumber", "street", "st", "l", "description"]
    },
    {
      "oid": "0.9.2342.19200300.100.4.19",
      "names": ["simpleSecurityObject"],
      "kind": "auxiliary",
      "superiors": ["top"],
      "must": ["userPassword"]
    }
  ]
}"#
}

/// Returns the `inetorgperson` schema bundle (RFC 2798) as a JSON string.
pub fn inetorgperson_schema() -> &'static str {
    r#"{
  "name": "inetorgperson",
  "dependencies": ["system", "core", "cosine"],
  "attributeTypes": [
    {
      "oid": "2.16.840.1.113730.3.1.1",
      "names": ["carLicense"],
      "equality": "caseIgnoreMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.15"
    },
    {
      "oid": "2.16.840.1.113730.3.1.2",
      "names": ["departmentNumber"],
      "equality": "caseIgnoreMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.15"
    },
    {
      "oid": "2.16.840.1.113730.3.1.241",
      "names": ["displayName"],
      "equality": "caseIgnoreMatch",
      "substring": "caseIgnoreSubstringsMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.15",
      "singleValue": true
    },
    {
      "oid": "2.16.840.1.113730.3.1.3",
      "names": ["employeeNumber"],
      "equality": "caseIgnoreMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.15",
      "singleValue": true
    },
    {
      "oid": "2.16.840.1.113730.3.1.4",
      "names": ["employeeType"],
      "equality": "caseIgnoreMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.15"
    },
    {
      "oid": "0.9.2342.19200300.100.1.60",
      "names": ["jpegPhoto"],
      "syntax": "1.3.6.1.4.1.1466.115.121.1.28"
    },
    {
      "oid": "2.16.840.1.113730.3.1.39",
      "names": ["preferredLanguage"],
      "equality": "caseIgnoreMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.15",
      "singleValue": true
    }
  ],
  "objectClasses": [
    {
      "oid": "2.16.840.1.113730.3.2.2",
      "names": ["inetOrgPerson"],
      "superiors": ["organizationalPerson"],
      "may": [
        "carLicense", "departmentNumber", "displayName", "employeeNumber", "employeeType",
        "givenName", "homePhone", "initials", "jpegPhoto", "mail", "manager", "mobile",
        "o", "preferredLanguage", "uid"
      ]
    }
  ]
}"#
}

/// Returns the `nis` schema bundle (RFC 2307) as a JSON string. The bundle
/// is disabled.
pub fn nis_schema() -> &'static str {
    r#"{
  "name": "nis",
  "dependencies": ["system", "core", "cosine"],
  "enabled": false,
  "attributeTypes": [
    {
      "oid": "1.3.6.1.1.1.1.0",
      "names": ["uidNumber"],
      "equality": "integerMatch",
      "ordering": "integerOrderingMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.27",
      "singleValue": true
    },
    {
      "oid": "1.3.6.1.1.1.1.1",
      "names": ["gidNumber"],
      "equality": "integerMatch",
      "ordering": "integerOrderingMatch",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.27",
      "singleValue": true
    },
    {
      "oid": "1.3.6.1.1.1.1.2",
      "names": ["gecos"],
      "equality": "caseIgnoreIA5Match",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.26",
      "singleValue": true
    },
    {
      "oid": "1.3.6.1.1.1.1.3",
      "names": ["homeDirectory"],
      "equality": "caseExactIA5Match",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.26",
      "singleValue": true
    },
    {
      "oid": "1.3.6.1.1.1.1.4",
      "names": ["loginShell"],
      "equality": "caseExactIA5Match",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.26",
      "singleValue": true
    },
    {
      "oid": "1.3.6.1.1.1.1.12",
      "names": ["memberUid"],
      "equality": "caseExactIA5Match",
      "syntax": "1.3.6.1.4.1.1466.115.121.1.26"
    }
  ],
  "objectClasses": [
    {
      "oid": "1.3.6.1.1.1.2.0",
      "names": ["posixAccount"],
      "kind": "auxiliary",
      "superiors": ["top"],
      "must": ["cn", "uid", "uidNumber", "gidNumber", "homeDirectory"],
      "may": ["userPassword", "loginShell", "gecos", "description"]
    },
    {
      "oid": "1.3.6.1.1.1.2.2",
      "names": ["posixGroup"],
      "superiors": ["top"],
      "must": ["cn", "gidNumber"],
      "may": ["userPassword", "memberUid", "description"]
    }
  ]
}"#
}

/// Every embedded schema bundle, dependencies first.
pub fn all_schemas() -> [&'static str; 5] {
    [
        system_schema(),
        core_schema(),
        cosine_schema(),
        inetorgperson_schema(),
        nis_schema(),
    ]
}
