//! Shared repository documents for unit tests.

use orchestra_avro_repository::{Repository, parse_repository};

/// Repository with session and application messages.
///
/// Field 58 (`Text`) is used by both `Logon` and `NewOrderSingle`; field 99
/// (`StopPx`) is not used by any message. `Percentage` carries an Avro
/// logical-type mapping.
pub const TRADING_REPOSITORY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<fixr:repository xmlns:fixr="http://fixprotocol.io/2020/orchestra/repository"
                 name="FIX.Test" version="FIX.5.0SP2_EP254">
    <fixr:datatypes>
        <fixr:datatype name="int"/>
        <fixr:datatype name="float"/>
        <fixr:datatype name="char"/>
        <fixr:datatype name="String"/>
        <fixr:datatype name="Length" baseType="int"/>
        <fixr:datatype name="SeqNum" baseType="int"/>
        <fixr:datatype name="NumInGroup" baseType="int"/>
        <fixr:datatype name="Price" baseType="float"/>
        <fixr:datatype name="Qty" baseType="float"/>
        <fixr:datatype name="Boolean" baseType="char"/>
        <fixr:datatype name="UTCTimestamp" baseType="String">
            <fixr:mappedDatatype standard="AVRO_V1" base="string"/>
        </fixr:datatype>
        <fixr:datatype name="Percentage" baseType="float">
            <fixr:mappedDatatype standard="AVRO_V1" base="bytes">
                <fixr:extension>
                    <logicalType name="decimal">
                        <keyValue key="scale" value="2"/>
                        <keyValue key="precision" value="4"/>
                    </logicalType>
                </fixr:extension>
            </fixr:mappedDatatype>
        </fixr:datatype>
    </fixr:datatypes>
    <fixr:codeSets>
        <fixr:codeSet name="SideCodeSet" id="54" type="char">
            <fixr:code name="Buy" id="54001" value="1"/>
            <fixr:code name="Sell" id="54002" value="2"/>
            <fixr:code name="Cross" id="54008" value="8"/>
            <fixr:annotation>
                <fixr:documentation>Side of order</fixr:documentation>
            </fixr:annotation>
        </fixr:codeSet>
        <fixr:codeSet name="EncryptMethodCodeSet" id="98" type="int">
            <fixr:code name="None" id="98001" value="0"/>
        </fixr:codeSet>
    </fixr:codeSets>
    <fixr:fields>
        <fixr:field id="8" name="BeginString" type="String"/>
        <fixr:field id="9" name="BodyLength" type="Length"/>
        <fixr:field id="10" name="CheckSum" type="String"/>
        <fixr:field id="11" name="ClOrdID" type="String">
            <fixr:annotation>
                <fixr:documentation>Unique identifier of the order</fixr:documentation>
            </fixr:annotation>
        </fixr:field>
        <fixr:field id="34" name="MsgSeqNum" type="SeqNum"/>
        <fixr:field id="35" name="MsgType" type="String"/>
        <fixr:field id="38" name="OrderQty" type="Qty"/>
        <fixr:field id="43" name="PossDupFlag" type="Boolean"/>
        <fixr:field id="44" name="Price" type="Price"/>
        <fixr:field id="54" name="Side" type="SideCodeSet"/>
        <fixr:field id="58" name="Text" type="String"/>
        <fixr:field id="60" name="TransactTime" type="UTCTimestamp"/>
        <fixr:field id="98" name="EncryptMethod" type="EncryptMethodCodeSet"/>
        <fixr:field id="99" name="StopPx" type="Price"/>
        <fixr:field id="108" name="HeartBtInt" type="int"/>
        <fixr:field id="112" name="TestReqID" type="String"/>
        <fixr:field id="372" name="RefMsgType" type="String"/>
        <fixr:field id="384" name="NoMsgTypes" type="NumInGroup"/>
        <fixr:field id="447" name="PartyIDSource" type="char"/>
        <fixr:field id="448" name="PartyID" type="String"/>
        <fixr:field id="453" name="NoPartyIDs" type="NumInGroup"/>
        <fixr:field id="516" name="OrderPercent" type="Percentage"/>
    </fixr:fields>
    <fixr:components>
        <fixr:component name="StandardHeader" id="1024" category="Session">
            <fixr:fieldRef id="8" presence="required"/>
            <fixr:fieldRef id="9" presence="required"/>
            <fixr:fieldRef id="35" presence="required"/>
            <fixr:fieldRef id="34" presence="required"/>
            <fixr:fieldRef id="43"/>
        </fixr:component>
        <fixr:component name="StandardTrailer" id="1025" category="Session">
            <fixr:fieldRef id="10" presence="required"/>
        </fixr:component>
        <fixr:component name="Parties" id="1012" category="Common">
            <fixr:groupRef id="1012" presence="required">
                <fixr:annotation>
                    <fixr:documentation>Party list</fixr:documentation>
                </fixr:annotation>
            </fixr:groupRef>
            <fixr:annotation>
                <fixr:documentation>Parties component</fixr:documentation>
            </fixr:annotation>
        </fixr:component>
        <fixr:component name="OrderQtyData" id="1011" category="Common">
            <fixr:fieldRef id="38"/>
            <fixr:fieldRef id="516"/>
        </fixr:component>
    </fixr:components>
    <fixr:groups>
        <fixr:group id="1012" name="PartyIDs" category="Common">
            <fixr:numInGroup id="453"/>
            <fixr:fieldRef id="448" presence="required"/>
            <fixr:fieldRef id="447"/>
            <fixr:annotation>
                <fixr:documentation>Parties of the order</fixr:documentation>
            </fixr:annotation>
        </fixr:group>
        <fixr:group id="2098" name="MsgTypeGrp" category="Session">
            <fixr:numInGroup id="384"/>
            <fixr:fieldRef id="372" presence="required"/>
        </fixr:group>
    </fixr:groups>
    <fixr:messages>
        <fixr:message name="Heartbeat" id="1" msgType="0" category="Session">
            <fixr:structure>
                <fixr:componentRef id="1024" presence="required"/>
                <fixr:fieldRef id="112"/>
                <fixr:componentRef id="1025" presence="required"/>
            </fixr:structure>
        </fixr:message>
        <fixr:message name="Logon" id="2" msgType="A" category="Session">
            <fixr:structure>
                <fixr:componentRef id="1024" presence="required"/>
                <fixr:fieldRef id="98" presence="required"/>
                <fixr:fieldRef id="108" presence="required"/>
                <fixr:groupRef id="2098"/>
                <fixr:fieldRef id="58"/>
                <fixr:componentRef id="1025" presence="required"/>
            </fixr:structure>
        </fixr:message>
        <fixr:message name="NewOrderSingle" id="14" msgType="D" category="SingleGeneralOrderHandling">
            <fixr:structure>
                <fixr:componentRef id="1024" presence="required"/>
                <fixr:fieldRef id="11" presence="required">
                    <fixr:annotation>
                        <fixr:documentation>Assigned by the sender</fixr:documentation>
                    </fixr:annotation>
                </fixr:fieldRef>
                <fixr:componentRef id="1012"/>
                <fixr:fieldRef id="54" presence="required"/>
                <fixr:fieldRef id="60" presence="required"/>
                <fixr:componentRef id="1011" presence="required"/>
                <fixr:fieldRef id="44"/>
                <fixr:fieldRef id="58"/>
                <fixr:componentRef id="1025" presence="required"/>
            </fixr:structure>
            <fixr:annotation>
                <fixr:documentation>New order</fixr:documentation>
            </fixr:annotation>
        </fixr:message>
    </fixr:messages>
    <fixr:categories>
        <fixr:category name="Session" section="Session"/>
        <fixr:category name="SingleGeneralOrderHandling" section="Trade"/>
    </fixr:categories>
    <fixr:sections>
        <fixr:section name="Session"/>
        <fixr:section name="Trade"/>
    </fixr:sections>
</fixr:repository>
"#;

/// Repository whose members point at undefined entities.
pub const BROKEN_REPOSITORY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<fixr:repository xmlns:fixr="http://fixprotocol.io/2020/orchestra/repository"
                 name="FIX.Broken" version="FIX.Latest">
    <fixr:fields>
        <fixr:field id="100" name="NoLegs" type="NumInGroup"/>
        <fixr:field id="101" name="LegSymbol" type="String"/>
        <fixr:field id="102" name="Account" type="String"/>
    </fixr:fields>
    <fixr:components>
        <fixr:component name="Looping" id="5000">
            <fixr:fieldRef id="102"/>
            <fixr:componentRef id="5000"/>
        </fixr:component>
    </fixr:components>
    <fixr:groups>
        <fixr:group id="3000" name="Legs">
            <fixr:numInGroup id="100"/>
            <fixr:fieldRef id="101"/>
            <fixr:groupRef id="3000"/>
        </fixr:group>
        <fixr:group id="3001" name="Orphans">
            <fixr:numInGroup id="777"/>
            <fixr:fieldRef id="101"/>
        </fixr:group>
    </fixr:groups>
    <fixr:messages>
        <fixr:message name="Allocation" id="20" msgType="J" category="Allocation">
            <fixr:structure>
                <fixr:groupRef id="3000" presence="required"/>
                <fixr:groupRef id="9999"/>
                <fixr:componentRef id="8888"/>
                <fixr:componentRef id="5000"/>
                <fixr:groupRef id="3001"/>
            </fixr:structure>
        </fixr:message>
    </fixr:messages>
</fixr:repository>
"#;

/// Parses the trading repository.
pub fn trading_repository() -> Repository {
    parse_repository(TRADING_REPOSITORY).expect("trading repository parses")
}

/// Parses the broken repository.
pub fn broken_repository() -> Repository {
    parse_repository(BROKEN_REPOSITORY).expect("broken repository parses")
}
