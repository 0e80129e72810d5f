//! Sample records shared by the test modules.

pub(crate) const DATACITE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<resource xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns="http://datacite.org/schema/kernel-4" xsi:schemaLocation="http://datacite.org/schema/kernel-4 http://schema.datacite.org/meta/kernel-4/metadata.xsd">
  <identifier identifierType="DOI">10.5438/4K3M-NYVG</identifier>
  <creators>
    <creator>
      <creatorName>Fenner, Martin</creatorName>
      <givenName>Martin</givenName>
      <familyName>Fenner</familyName>
      <nameIdentifier schemeURI="http://orcid.org/" nameIdentifierScheme="ORCID">0000-0003-1419-2405</nameIdentifier>
    </creator>
  </creators>
  <titles>
    <title>Eating your own Dog Food</title>
  </titles>
  <publisher>DataCite</publisher>
  <publicationYear>2016</publicationYear>
  <resourceType resourceTypeGeneral="Text">BlogPosting</resourceType>
  <alternateIdentifiers>
    <alternateIdentifier alternateIdentifierType="Local accession number">MS-49-3632-5083</alternateIdentifier>
  </alternateIdentifiers>
  <subjects>
    <subject>datacite</subject>
    <subject>doi</subject>
    <subject subjectScheme="DDC">metadata</subject>
  </subjects>
  <contributors>
    <contributor contributorType="ContactPerson">
      <contributorName>DataCite Support</contributorName>
    </contributor>
  </contributors>
  <dates>
    <date dateType="Created">2016-12-20</date>
    <date dateType="Issued">2016-12-20</date>
    <date dateType="Updated">2016-12-20</date>
  </dates>
  <language>en</language>
  <relatedIdentifiers>
    <relatedIdentifier relatedIdentifierType="DOI" relationType="References">10.5438/0012</relatedIdentifier>
    <relatedIdentifier relatedIdentifierType="DOI" relationType="References">10.5438/55E5-T5C0</relatedIdentifier>
    <relatedIdentifier relatedIdentifierType="DOI" relationType="IsPartOf">10.5438/0000-00SS</relatedIdentifier>
  </relatedIdentifiers>
  <sizes>
    <size>4 pages</size>
  </sizes>
  <formats>
    <format>text/html</format>
  </formats>
  <version>1.0</version>
  <rightsList>
    <rights rightsURI="https://creativecommons.org/licenses/by/4.0/">Creative Commons Attribution 4.0 International</rights>
  </rightsList>
  <descriptions>
    <description descriptionType="Abstract">Eating your own dog food is a slang term to describe that an organization should itself use the products and services it provides.</description>
  </descriptions>
  <geoLocations>
    <geoLocation>
      <geoLocationPlace>Berlin</geoLocationPlace>
      <geoLocationPoint>
        <pointLongitude>13.4</pointLongitude>
        <pointLatitude>52.5</pointLatitude>
      </geoLocationPoint>
    </geoLocation>
  </geoLocations>
  <fundingReferences>
    <fundingReference>
      <funderName>European Commission</funderName>
      <funderIdentifier funderIdentifierType="Crossref Funder ID">https://doi.org/10.13039/501100000780</funderIdentifier>
      <awardNumber awardURI="http://cordis.europa.eu/project/rcn/194927_en.html">654039</awardNumber>
      <awardTitle>THOR – Technical and Human Infrastructure for Open Research</awardTitle>
    </fundingReference>
  </fundingReferences>
</resource>
"#;

pub(crate) const CROSSREF_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<doi_records>
  <doi_record owner="10.7554" timestamp="2015-08-11 07:35:02">
    <crossref>
      <journal>
        <journal_metadata language="en">
          <full_title>eLife</full_title>
          <abbrev_title>eLife</abbrev_title>
          <issn media_type="electronic">2050-084X</issn>
        </journal_metadata>
        <journal_issue>
          <publication_date media_type="online">
            <month>02</month>
            <day>11</day>
            <year>2014</year>
          </publication_date>
          <journal_volume>
            <volume>3</volume>
          </journal_volume>
        </journal_issue>
        <journal_article publication_type="full_text">
          <titles>
            <title>Automated quantitative histology reveals vascular morphodynamics during Arabidopsis hypocotyl secondary growth</title>
          </titles>
          <contributors>
            <person_name contributor_role="author" sequence="first">
              <given_name>Martial</given_name>
              <surname>Sankar</surname>
            </person_name>
            <person_name contributor_role="author" sequence="additional">
              <given_name>Kaisa</given_name>
              <surname>Nieminen</surname>
              <ORCID>http://orcid.org/0000-0002-6240-5434</ORCID>
            </person_name>
            <person_name contributor_role="editor" sequence="first">
              <given_name>Detlef</given_name>
              <surname>Weigel</surname>
            </person_name>
          </contributors>
          <jats:abstract xmlns:jats="http://www.ncbi.nlm.nih.gov/JATS1">
            <jats:p>Among various advantages, their small size makes model organisms preferred subjects of investigation.</jats:p>
          </jats:abstract>
          <publication_date media_type="online">
            <month>02</month>
            <day>11</day>
            <year>2014</year>
          </publication_date>
          <pages>
            <first_page>e01567</first_page>
          </pages>
          <fr:program xmlns:fr="http://www.crossref.org/fundref.xsd" name="fundref">
            <fr:assertion name="fundgroup">
              <fr:assertion name="funder_name">SystemsX
                <fr:assertion name="funder_identifier">http://dx.doi.org/10.13039/501100006390</fr:assertion>
              </fr:assertion>
              <fr:assertion name="award_number">SXPHI0_142001</fr:assertion>
            </fr:assertion>
          </fr:program>
          <ai:program xmlns:ai="http://www.crossref.org/AccessIndicators.xsd" name="AccessIndicators">
            <ai:license_ref applies_to="vor">http://creativecommons.org/licenses/by/3.0/</ai:license_ref>
          </ai:program>
          <doi_data>
            <doi>10.7554/eLife.01567</doi>
            <resource>http://elifesciences.org/lookup/doi/10.7554/eLife.01567</resource>
          </doi_data>
          <citation_list>
            <citation key="bib1">
              <doi>10.1038/ncb2764</doi>
            </citation>
            <citation key="bib2">
              <unstructured_citation>Mauseth JD. 1988. Plant anatomy.</unstructured_citation>
            </citation>
            <citation key="bib3">
              <doi>10.1104/pp.112.205740</doi>
            </citation>
          </citation_list>
        </journal_article>
      </journal>
    </crossref>
  </doi_record>
</doi_records>
"#;

pub(crate) const CODEMETA: &str = r#"{
  "@context": "https://raw.githubusercontent.com/codemeta/codemeta/master/codemeta.jsonld",
  "@type": "SoftwareSourceCode",
  "@id": "https://doi.org/10.5438/QEG0-3GM3",
  "agents": [
    {
      "@id": "http://orcid.org/0000-0003-0077-4738",
      "@type": "person",
      "name": "Martin Fenner"
    }
  ],
  "codeRepository": "https://github.com/datacite/maremma",
  "dateCreated": "2015-11-28",
  "datePublished": "2017-02-24",
  "dateModified": "2017-02-24",
  "description": "Ruby utility library for network requests. Based on Faraday and Excon, provides a wrapper for XML/JSON parsing and error handling.",
  "funding": "none",
  "isAutomatedBuild": false,
  "licenseId": "MIT",
  "publisher": "DataCite",
  "tags": ["faraday", "excon", "net/http"],
  "title": "Maremma: a Ruby library for simplified network calls",
  "version": "3.5.7",
  "programmingLanguage": "ruby"
}
"#;

pub(crate) const SCHEMA_ORG: &str = r#"{
  "@context": "http://schema.org",
  "@type": "BlogPosting",
  "@id": "https://doi.org/10.5438/4K3M-NYVG",
  "url": "https://blog.datacite.org/eating-your-own-dog-food",
  "name": "Eating your own Dog Food",
  "alternateName": "MS-49-3632-5083",
  "author": {
    "@type": "Person",
    "@id": "http://orcid.org/0000-0003-1419-2405",
    "givenName": "Martin",
    "familyName": "Fenner",
    "name": "Martin Fenner"
  },
  "description": "Eating your own dog food is a slang term to describe that an organization should itself use the products and services it provides. For DataCite this means that we should use DOIs with appropriate metadata and strategies for long-term preservation for...",
  "license": "https://creativecommons.org/licenses/by/4.0/",
  "version": "1.0",
  "keywords": "datacite, doi, metadata, featured",
  "inLanguage": "en",
  "datePublished": "2016-12-20",
  "dateCreated": "2016-12-20",
  "dateModified": "2016-12-20",
  "isPartOf": {
    "@type": "CreativeWork",
    "@id": "https://doi.org/10.5438/0000-00SS"
  },
  "citation": [
    {
      "@type": "CreativeWork",
      "@id": "https://doi.org/10.5438/0012"
    },
    {
      "@type": "CreativeWork",
      "@id": "https://doi.org/10.5438/55E5-T5C0"
    }
  ],
  "publisher": {
    "@type": "Organization",
    "name": "DataCite"
  },
  "periodical": {
    "@type": "Blog",
    "name": "DataCite Blog"
  },
  "provider": {
    "@type": "Organization",
    "name": "datacite"
  }
}
"#;

pub(crate) const SCHEMA_ORG_LIST: &str = r#"[
  {
    "@context": "http://schema.org",
    "@type": "Dataset",
    "@id": "https://doi.org/10.23725/7jg3-v803",
    "identifier": [
      {
        "@type": "PropertyValue",
        "propertyID": "doi",
        "value": "https://doi.org/10.23725/7jg3-v803"
      },
      {
        "@type": "PropertyValue",
        "propertyID": "minid",
        "value": "ark:/99999/fk4E1n6n1YHKxPk"
      },
      {
        "@type": "PropertyValue",
        "propertyID": "dataguid",
        "value": "dg.4503/01b048d0-e128-4cb0-94e9-b2d2cab7563d"
      },
      {
        "@type": "PropertyValue",
        "propertyID": "md5",
        "value": "f9e72bdf25bf4b4f0e581d9218fec2eb"
      }
    ],
    "url": "https://ors.datacite.org/doi:/10.23725/7jg3-v803",
    "additionalType": "CRAM file",
    "name": "NWD100953.recab.cram",
    "author": {
      "@type": "Organization",
      "name": "TOPMed"
    },
    "keywords": "topmed, whole genome sequencing",
    "datePublished": "2017-11-30",
    "publisher": {
      "@type": "Organization",
      "name": "TOPMed"
    },
    "contentSize": "20.55 GB",
    "encodingFormat": "application/octet-stream",
    "funder": {
      "@type": "Organization",
      "@id": "https://doi.org/10.13039/100000050",
      "name": "National Heart, Lung, and Blood Institute (NHLBI)"
    },
    "distribution": [
      {
        "@type": "DataDownload",
        "contentUrl": "s3://cgp-commons-public/topmed_open_access/44a8837b-4456-5709-b56b-54e23000f13a/NWD100953.recab.cram"
      },
      {
        "@type": "DataDownload",
        "contentUrl": "gs://topmed-irc-share/public/NWD100953.recab.cram"
      }
    ]
  },
  {
    "@context": "http://schema.org",
    "@type": "Dataset",
    "@id": "https://doi.org/10.23725/2g4s-qv04",
    "name": "NWD165827.recab.cram"
  }
]
"#;

pub(crate) const SCHEMA_ORG_GEOLOCATION: &str = r#"{
  "@context": "http://schema.org",
  "@type": "Dataset",
  "@id": "https://doi.org/10.6071/Z7WC73",
  "additionalType": "dataset",
  "name": "Southern Sierra Critical Zone Observatory (SSCZO), Providence Creek meteorological data, soil moisture and temperature, snow depth and air temperature",
  "author": [
    {
      "@type": "Person",
      "givenName": "Roger",
      "familyName": "Bales",
      "name": "Roger Bales"
    },
    {
      "@type": "Organization",
      "name": "Tara Oceans Consortium, Coordinators"
    },
    {
      "name": "Johansson, Emma"
    }
  ],
  "keywords": ["Earth sciences", "soil moisture", "Nevada"],
  "datePublished": "2013",
  "dateModified": "2014-10-17",
  "publisher": {
    "@type": "Organization",
    "name": "UC Merced"
  },
  "includedInDataCatalog": {
    "@type": "DataCatalog",
    "name": "Dash",
    "url": "https://dash.ucmerced.edu"
  },
  "funder": {
    "@type": "Organization",
    "name": "National Science Foundation, Division of Earth Sciences, Critical Zone Observatories"
  },
  "spatialCoverage": [
    {
      "@type": "Place",
      "geo": {
        "@type": "GeoCoordinates",
        "address": "Providence Creek (Lower, Upper and P301)",
        "latitude": "37.047756",
        "longitude": "-119.221094"
      }
    },
    {
      "@type": "Place",
      "geo": {
        "@type": "GeoShape",
        "box": "-64.3088 -168.5182 79.6753 174.9006"
      }
    },
    {
      "@type": "Place",
      "name": "Sierra Nevada"
    }
  ]
}
"#;

pub(crate) const DATACITE_JSON: &str = r#"{
  "id": "https://doi.org/10.5063/f1m61h5x",
  "doi": "10.5063/F1M61H5X",
  "url": "https://github.com/datacite/maremma",
  "creator": [
    {
      "type": "Person",
      "id": "https://orcid.org/0000-0003-0077-4738",
      "name": "Matt Jones",
      "givenName": "Matt",
      "familyName": "Jones"
    }
  ],
  "titles": [
    {
      "title": "Maremma: a Ruby library for simplified network calls"
    }
  ],
  "publisher": "KNB Data Repository",
  "types": {
    "resourceTypeGeneral": "Software",
    "resourceType": "Ruby gem"
  },
  "subjects": [
    {
      "subject": "faraday"
    },
    {
      "subject": "excon"
    }
  ],
  "dates": [
    {
      "date": "2017-02-24",
      "dateType": "Issued"
    }
  ],
  "publicationYear": "2017",
  "language": "en",
  "relatedIdentifiers": [
    {
      "relatedIdentifier": "https://github.com/datacite/maremma",
      "relatedIdentifierType": "URL",
      "relationType": "IsSupplementTo"
    }
  ],
  "version": "3.5.7",
  "rightsList": [
    {
      "rights": "MIT License",
      "rightsUri": "https://opensource.org/licenses/MIT"
    }
  ],
  "descriptions": [
    {
      "description": "Ruby utility library for network requests.",
      "descriptionType": "Abstract"
    }
  ],
  "schemaVersion": "http://datacite.org/schema/kernel-4",
  "providerId": "DATACITE",
  "clientId": "DATACITE.DATACITE"
}
"#;

pub(crate) const DATACITE_JSON_OVERLAPPING_KEYS: &str = r#"{
  "id": "https://doi.org/10.5063/f1m61h5x",
  "doi": "10.5063/F1M61H5X",
  "id": "https://doi.org/10.5063/F1M61H5X",
  "titles": [
    {
      "title": "Maremma: a Ruby library for simplified network calls"
    }
  ],
  "types": {
    "resourceTypeGeneral": "Software"
  },
  "schemaVersion": "http://datacite.org/schema/kernel-4"
}
"#;

pub(crate) const DATACITE_JSON_MISSING_COMMA: &str = r#"{
  "id": "https://doi.org/10.5063/f1m61h5x",
  "doi": "10.5063/F1M61H5X"
  "url": "https://github.com/datacite/maremma",
  "schemaVersion": "http://datacite.org/schema/kernel-4"
}
"#;

pub(crate) const CROSSREF_JSON: &str = r#"{
  "status": "ok",
  "message-type": "work",
  "message-version": "1.0.0",
  "message": {
    "publisher": "Public Library of Science (PLoS)",
    "issue": "1",
    "DOI": "10.1371/journal.pone.0000030",
    "type": "journal-article",
    "page": "e30",
    "title": [
      "Triose Phosphate Isomerase Deficiency Is Caused by Altered Dimerization–Not Catalytic Inactivity–of the Mutant Enzymes"
    ],
    "volume": "1",
    "author": [
      {
        "given": "Markus",
        "family": "Ralser",
        "sequence": "first"
      },
      {
        "given": "Gino",
        "family": "Heeren",
        "sequence": "additional",
        "ORCID": "http://orcid.org/0000-0002-1825-0097"
      },
      {
        "name": "TPI Study Group",
        "sequence": "additional"
      }
    ],
    "container-title": ["PLoS ONE"],
    "ISSN": ["1932-6203"],
    "issued": {
      "date-parts": [[2006, 12, 20]]
    },
    "created": {
      "date-parts": [[2006, 12, 21]],
      "date-time": "2006-12-21T01:04:33Z"
    },
    "URL": "http://dx.doi.org/10.1371/journal.pone.0000030",
    "reference": [
      {
        "key": "ref1",
        "DOI": "10.1056/NEJM199105163242002"
      },
      {
        "key": "ref2",
        "unstructured": "Schneider AS. Triosephosphate isomerase deficiency."
      }
    ],
    "funder": [
      {
        "DOI": "10.13039/501100001659",
        "name": "Deutsche Forschungsgemeinschaft",
        "award": ["SFB 618"]
      }
    ],
    "license": [
      {
        "URL": "http://creativecommons.org/licenses/by/4.0/",
        "content-version": "vor"
      }
    ],
    "language": "en",
    "subject": ["General Biochemistry, Genetics and Molecular Biology"]
  }
}
"#;

pub(crate) const CITEPROC: &str = r#"{
  "type": "post-weblog",
  "id": "https://doi.org/10.5438/4k3m-nyvg",
  "author": [
    {
      "family": "Fenner",
      "given": "Martin"
    },
    {
      "literal": "DataCite Metadata Working Group"
    }
  ],
  "issued": {
    "date-parts": [[2016, 12, 20]]
  },
  "submitted": {
    "date-parts": [[2016, 12, 19]]
  },
  "abstract": "Eating your own dog food is a slang term to describe that an organization should itself use the products and services it provides.",
  "container-title": "DataCite Blog",
  "DOI": "10.5438/4K3M-NYVG",
  "publisher": "DataCite",
  "title": "Eating your own Dog Food",
  "URL": "https://blog.datacite.org/eating-your-own-dog-food",
  "version": "1.0",
  "keyword": "datacite, doi, metadata",
  "language": "en",
  "copyright": "https://creativecommons.org/licenses/by/4.0/"
}
"#;

pub(crate) const BIBTEX: &str = r#"@article{https://doi.org/10.7554/elife.01567,
  doi = {10.7554/eLife.01567},
  url = {http://dx.doi.org/10.7554/eLife.01567},
  year = 2014,
  month = {feb},
  publisher = {{eLife} Sciences Organisation, Ltd.},
  volume = {3},
  pages = {e01567},
  author = {Sankar, Martial and Nieminen, Kaisa and Ragni, Laura and Xenarios, Ioannis and Hardtke, Christian S},
  title = {Automated quantitative histology reveals vascular morphodynamics during {Arabidopsis} hypocotyl secondary growth},
  journal = {{eLife}},
  issn = {2050-084X},
  keywords = {Arabidopsis, hypocotyl},
  copyright = {http://creativecommons.org/licenses/by/3.0/}
}
"#;

pub(crate) const RIS: &str = r#"TY  - JOUR
T1  - Automated quantitative histology reveals vascular morphodynamics during Arabidopsis hypocotyl secondary growth
T2  - eLife
AU  - Sankar, Martial
AU  - Nieminen, Kaisa
AU  - Ragni, Laura
AU  - Xenarios, Ioannis
AU  - Hardtke, Christian S
ED  - Weigel, Detlef
DO  - 10.7554/eLife.01567
UR  - http://elifesciences.org/lookup/doi/10.7554/eLife.01567
AB  - Among various advantages, their small size makes model organisms preferred subjects of investigation.
PY  - 2014/02/11/
PB  - eLife Sciences Organisation, Ltd.
VL  - 3
SP  - e01567
SN  - 2050-084X
KW  - Arabidopsis
KW  - hypocotyl
LA  - en
ER  -
"#;
